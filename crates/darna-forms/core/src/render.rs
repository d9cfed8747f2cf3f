// File: src/render.rs
// Purpose: Rendering seam between form state and the page

use serde::{Deserialize, Serialize};

use crate::field::FieldId;

/// Kind of top-level form message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    /// CSS class added next to `form-message`
    pub fn class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Applies validation outcomes to the visible form
///
/// Implementations only draw. Which field is invalid and which banner is
/// shown is decided by [`crate::FormState`]; the renderer never answers
/// those questions.
pub trait Renderer {
    /// Mark the field invalid and show `message` next to it
    fn annotate(&mut self, field: FieldId, message: &str);

    /// Remove the error mark and message of the field, if any
    fn clear_annotation(&mut self, field: FieldId);

    fn has_focus(&self, field: FieldId) -> bool;

    fn focus(&mut self, field: FieldId);

    fn scroll_into_view(&mut self, field: FieldId);

    /// Insert the banner as the first child of the form
    fn show_banner(&mut self, kind: BannerKind, message: &str);

    fn hide_banner(&mut self);

    /// Restore every control to its initial value
    fn reset_form(&mut self);
}
