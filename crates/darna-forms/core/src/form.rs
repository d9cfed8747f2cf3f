// File: src/form.rs
// Purpose: Per-form state: field statuses and the single banner

use crate::error::{Error, Result};
use crate::field::{Field, FieldId, FieldValue};
use crate::messages::Messages;
use crate::render::{BannerKind, Renderer};
use crate::validator::evaluate;

/// Validation status of one field; the annotation on screen mirrors it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Not checked since load, reset, or the last edit
    #[default]
    Unchecked,
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// The top-level success or error message of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

#[derive(Debug, Clone)]
struct FieldEntry {
    field: Field,
    initial: FieldValue,
    status: FieldStatus,
}

/// Fields in DOM order plus at most one banner
#[derive(Debug, Clone, Default)]
pub struct FormState {
    entries: Vec<FieldEntry>,
    banner: Option<Banner>,
}

impl FormState {
    /// Build from fields in DOM order; their values become the reset values
    pub fn new(fields: Vec<Field>) -> Self {
        let entries = fields
            .into_iter()
            .map(|field| FieldEntry {
                initial: field.value.clone(),
                field,
                status: FieldStatus::Unchecked,
            })
            .collect();
        Self {
            entries,
            banner: None,
        }
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.entries.get(id.0).map(|e| &e.field)
    }

    pub fn status(&self, id: FieldId) -> Option<&FieldStatus> {
        self.entries.get(id.0).map(|e| &e.status)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Find a field by its name
    pub fn find(&self, name: &str) -> Option<FieldId> {
        self.entries
            .iter()
            .position(|e| e.field.name == name)
            .map(FieldId)
    }

    /// Number of fields currently carrying an error annotation
    pub fn annotation_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_invalid()).count()
    }

    pub fn first_invalid(&self) -> Option<FieldId> {
        self.entries
            .iter()
            .position(|e| e.status.is_invalid())
            .map(FieldId)
    }

    /// Record the control's current value
    pub fn set_value(&mut self, id: FieldId, value: FieldValue) -> Result<()> {
        self.entry_mut(id)?.field.value = value;
        Ok(())
    }

    /// Check one field and update its annotation
    pub fn validate_field<R: Renderer>(
        &mut self,
        id: FieldId,
        messages: &Messages,
        renderer: &mut R,
    ) -> Result<bool> {
        let result = evaluate(&self.entry(id)?.field, messages);
        match result.message {
            Some(message) if !result.is_valid => {
                self.show_field_error(id, &message, renderer)?;
                Ok(false)
            }
            _ => {
                self.clear_field_error(id, renderer)?;
                self.entry_mut(id)?.status = FieldStatus::Valid;
                Ok(true)
            }
        }
    }

    /// Check every field, even after one has failed
    pub fn validate_all<R: Renderer>(&mut self, messages: &Messages, renderer: &mut R) -> bool {
        let mut all_valid = true;
        for index in 0..self.entries.len() {
            // Ids come from our own range, so lookups cannot fail
            if !self
                .validate_field(FieldId(index), messages, renderer)
                .unwrap_or(false)
            {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Replace the field's annotation and pull focus to it
    pub fn show_field_error<R: Renderer>(
        &mut self,
        id: FieldId,
        message: &str,
        renderer: &mut R,
    ) -> Result<()> {
        self.clear_field_error(id, renderer)?;
        self.entry_mut(id)?.status = FieldStatus::Invalid(message.to_string());
        renderer.annotate(id, message);
        if !renderer.has_focus(id) {
            renderer.focus(id);
        }
        Ok(())
    }

    /// Drop the field's annotation without re-validating
    pub fn clear_field_error<R: Renderer>(&mut self, id: FieldId, renderer: &mut R) -> Result<()> {
        let entry = self.entry_mut(id)?;
        if entry.status.is_invalid() {
            renderer.clear_annotation(id);
        }
        entry.status = FieldStatus::Unchecked;
        Ok(())
    }

    /// Show `message` as the only banner of the form
    pub fn show_banner<R: Renderer>(&mut self, kind: BannerKind, message: &str, renderer: &mut R) {
        self.hide_banner(renderer);
        renderer.show_banner(kind, message);
        self.banner = Some(Banner {
            kind,
            message: message.to_string(),
        });
    }

    pub fn hide_banner<R: Renderer>(&mut self, renderer: &mut R) {
        if self.banner.take().is_some() {
            renderer.hide_banner();
        }
    }

    /// Restore initial values and forget every status
    pub fn reset<R: Renderer>(&mut self, renderer: &mut R) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.status.is_invalid() {
                renderer.clear_annotation(FieldId(index));
            }
            entry.field.value = entry.initial.clone();
            entry.status = FieldStatus::Unchecked;
        }
        renderer.reset_form();
    }

    fn entry(&self, id: FieldId) -> Result<&FieldEntry> {
        self.entries.get(id.0).ok_or(Error::UnknownField(id))
    }

    fn entry_mut(&mut self, id: FieldId) -> Result<&mut FieldEntry> {
        self.entries.get_mut(id.0).ok_or(Error::UnknownField(id))
    }
}
