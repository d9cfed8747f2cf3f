// File: tests/common/mod.rs
// Purpose: In-memory page used by the integration scenarios

use std::collections::BTreeMap;

use darna_forms_core::{BannerKind, FieldId, Renderer};

/// What a visitor would see: error classes, inline messages, one banner
#[derive(Debug, Default)]
pub struct Page {
    pub error_class: BTreeMap<FieldId, bool>,
    pub error_messages: BTreeMap<FieldId, Vec<String>>,
    pub banners: Vec<(BannerKind, String)>,
    pub focused: Option<FieldId>,
    pub scrolled_to: Option<FieldId>,
    pub resets: usize,
}

#[allow(dead_code)]
impl Page {
    pub fn has_error_class(&self, id: FieldId) -> bool {
        self.error_class.get(&id).copied().unwrap_or(false)
    }

    pub fn messages_for(&self, id: FieldId) -> &[String] {
        self.error_messages.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn annotation_count(&self) -> usize {
        self.error_messages.values().map(Vec::len).sum()
    }

    pub fn banner(&self) -> Option<(BannerKind, &str)> {
        self.banners.first().map(|(k, m)| (*k, m.as_str()))
    }
}

impl Renderer for Page {
    fn annotate(&mut self, field: FieldId, message: &str) {
        self.error_class.insert(field, true);
        self.error_messages
            .entry(field)
            .or_default()
            .push(message.to_string());
    }

    fn clear_annotation(&mut self, field: FieldId) {
        self.error_class.insert(field, false);
        self.error_messages.remove(&field);
    }

    fn has_focus(&self, field: FieldId) -> bool {
        self.focused == Some(field)
    }

    fn focus(&mut self, field: FieldId) {
        self.focused = Some(field);
    }

    fn scroll_into_view(&mut self, field: FieldId) {
        self.scrolled_to = Some(field);
    }

    fn show_banner(&mut self, kind: BannerKind, message: &str) {
        self.banners.insert(0, (kind, message.to_string()));
    }

    fn hide_banner(&mut self) {
        self.banners.clear();
    }

    fn reset_form(&mut self) {
        self.resets += 1;
    }
}
