// File: src/renderer.rs
// Purpose: Renderer that draws annotations and banners into the page

use std::collections::HashMap;

use darna_forms_core::{BannerKind, FieldId, Renderer};
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{
    Document, Element, HtmlFormElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::dom::Control;

pub const ERROR_CLASS: &str = "error";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";
pub const BANNER_CLASS: &str = "form-message";

/// Draws one form's state into its DOM subtree
pub struct DomRenderer {
    document: Document,
    form: HtmlFormElement,
    controls: Vec<Control>,
    annotations: HashMap<FieldId, Element>,
}

impl DomRenderer {
    pub fn new(document: Document, form: HtmlFormElement, controls: Vec<Control>) -> Self {
        Self {
            document,
            form,
            controls,
            annotations: HashMap::new(),
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    fn control(&self, field: FieldId) -> Option<&Control> {
        self.controls.get(field.0)
    }

    fn try_annotate(&mut self, field: FieldId, message: &str) -> Result<(), JsValue> {
        let Some(control) = self.control(field) else {
            return Ok(());
        };
        let element = control.element().clone();
        element.class_list().add_1(ERROR_CLASS)?;

        let note = self.document.create_element("div")?;
        note.set_class_name(ERROR_MESSAGE_CLASS);
        note.set_text_content(Some(message));
        if let Some(parent) = element.parent_node() {
            parent.append_child(&note)?;
        }
        self.annotations.insert(field, note);
        Ok(())
    }

    fn try_clear(&mut self, field: FieldId) -> Result<(), JsValue> {
        if let Some(control) = self.control(field) {
            control.element().class_list().remove_1(ERROR_CLASS)?;
        }
        if let Some(note) = self.annotations.remove(&field) {
            note.remove();
        }
        Ok(())
    }

    fn try_show_banner(&mut self, kind: BannerKind, message: &str) -> Result<(), JsValue> {
        let banner = self.document.create_element("div")?;
        banner.set_class_name(&format!("{} {}", BANNER_CLASS, kind.class()));
        banner.set_text_content(Some(message));
        let first = self.form.first_child();
        self.form.insert_before(&banner, first.as_ref())?;
        Ok(())
    }

    fn try_hide_banner(&mut self) -> Result<(), JsValue> {
        let banners = self.form.query_selector_all(&format!(".{}", BANNER_CLASS))?;
        for i in 0..banners.length() {
            if let Some(node) = banners.item(i) {
                if let Some(parent) = node.parent_node() {
                    parent.remove_child(&node)?;
                }
            }
        }
        Ok(())
    }
}

fn report(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!(action, error = ?err, "DOM update failed");
    }
}

impl Renderer for DomRenderer {
    fn annotate(&mut self, field: FieldId, message: &str) {
        let result = self.try_annotate(field, message);
        report("annotate", result);
    }

    fn clear_annotation(&mut self, field: FieldId) {
        let result = self.try_clear(field);
        report("clear annotation", result);
    }

    fn has_focus(&self, field: FieldId) -> bool {
        let active = self.document.active_element();
        match (active, self.control(field)) {
            (Some(active), Some(control)) => {
                let element: &Element = control.element();
                &active == element
            }
            _ => false,
        }
    }

    fn focus(&mut self, field: FieldId) {
        if let Some(control) = self.control(field) {
            report("focus", control.element().focus());
        }
    }

    fn scroll_into_view(&mut self, field: FieldId) {
        if let Some(control) = self.control(field) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Center);
            control
                .element()
                .scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn show_banner(&mut self, kind: BannerKind, message: &str) {
        let result = self.try_show_banner(kind, message);
        report("show banner", result);
    }

    fn hide_banner(&mut self) {
        let result = self.try_hide_banner();
        report("hide banner", result);
    }

    fn reset_form(&mut self) {
        self.form.reset();
    }
}
