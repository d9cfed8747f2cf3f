// File: src/effects.rs
// Purpose: Focus decoration of form control wrappers

/// Class put on a control's parent while it is focused or filled
pub const FOCUSED_CLASS: &str = "focused";

/// Events that change the wrapper decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Load,
    Focus,
    Blur,
}

/// Whether the wrapper should carry [`FOCUSED_CLASS`] after `event`
///
/// Returns `None` when the event leaves the decoration unchanged.
pub fn focused_after(event: FocusEvent, value: &str) -> Option<bool> {
    match event {
        FocusEvent::Focus => Some(true),
        FocusEvent::Blur if value.is_empty() => Some(false),
        FocusEvent::Load if !value.is_empty() => Some(true),
        _ => None,
    }
}
