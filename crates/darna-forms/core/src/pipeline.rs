// File: src/pipeline.rs
// Purpose: Submission handling for the contact form and the newsletter forms
//
// The two pipelines are intentionally separate: the contact form runs every
// field through the full validator, the newsletter box only checks the email
// format.

use std::sync::Arc;

use tracing::debug;

use crate::config::FormsConfig;
use crate::error::{Error, Result};
use crate::field::{Field, FieldId, FieldKind, FieldValue};
use crate::form::FormState;
use crate::render::{BannerKind, Renderer};
use crate::schedule::{DismissalTimer, Scheduler, TaskId};
use crate::validator::evaluate_email_only;

/// What a submit attempt ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { first_invalid: Option<FieldId> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// The primary contact form
#[derive(Debug)]
pub struct ContactForm {
    state: FormState,
    dismissal: DismissalTimer,
    config: Arc<FormsConfig>,
}

impl ContactForm {
    pub fn new(fields: Vec<Field>, config: Arc<FormsConfig>) -> Self {
        Self {
            state: FormState::new(fields),
            dismissal: DismissalTimer::new(),
            config,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn pending_dismissal(&self) -> Option<TaskId> {
        self.dismissal.pending()
    }

    /// Record the control's current value before it is checked
    pub fn update_value(&mut self, id: FieldId, value: FieldValue) -> Result<()> {
        self.state.set_value(id, value)
    }

    /// Field lost focus: re-check it
    pub fn on_blur<R: Renderer>(&mut self, id: FieldId, renderer: &mut R) -> Result<bool> {
        self.state.validate_field(id, &self.config.messages, renderer)
    }

    /// Field edited: drop its error without re-checking
    pub fn on_input<R: Renderer>(
        &mut self,
        id: FieldId,
        value: FieldValue,
        renderer: &mut R,
    ) -> Result<()> {
        self.state.set_value(id, value)?;
        self.state.clear_field_error(id, renderer)
    }

    pub fn on_submit<R: Renderer, S: Scheduler>(
        &mut self,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> SubmitOutcome {
        if self.config.cancel_pending_dismissal {
            self.dismissal.cancel(scheduler);
        }

        let messages = &self.config.messages;
        if self.state.validate_all(messages, renderer) {
            self.state
                .show_banner(BannerKind::Success, &messages.contact_success, renderer);
            self.dismissal.arm(
                scheduler,
                self.config.dismiss_delay(),
                self.config.cancel_pending_dismissal,
            );
            debug!(form = "contact", "submission accepted");
            return SubmitOutcome::Accepted;
        }

        self.state
            .show_banner(BannerKind::Error, &messages.contact_error, renderer);
        let first_invalid = self.state.first_invalid();
        if let Some(id) = first_invalid {
            renderer.scroll_into_view(id);
        }
        debug!(
            form = "contact",
            invalid = self.state.annotation_count(),
            "submission rejected"
        );
        SubmitOutcome::Rejected { first_invalid }
    }

    /// A dismissal delay elapsed: reset the form and drop the banner
    pub fn on_dismiss<R: Renderer>(&mut self, task: TaskId, renderer: &mut R) -> bool {
        if !self.dismissal.fire(task, self.config.cancel_pending_dismissal) {
            debug!(form = "contact", task = task.0, "stale dismissal ignored");
            return false;
        }
        self.state.reset(renderer);
        self.state.hide_banner(renderer);
        true
    }
}

/// A newsletter sign-up form
#[derive(Debug)]
pub struct NewsletterForm {
    state: FormState,
    email: FieldId,
    dismissal: DismissalTimer,
    config: Arc<FormsConfig>,
}

impl NewsletterForm {
    /// Fails when no field has the email type
    pub fn new(fields: Vec<Field>, config: Arc<FormsConfig>) -> Result<Self> {
        let email = fields
            .iter()
            .position(|f| f.kind == FieldKind::Email)
            .map(FieldId)
            .ok_or(Error::MissingEmailField)?;
        Ok(Self {
            state: FormState::new(fields),
            email,
            dismissal: DismissalTimer::new(),
            config,
        })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn email_field(&self) -> FieldId {
        self.email
    }

    pub fn pending_dismissal(&self) -> Option<TaskId> {
        self.dismissal.pending()
    }

    pub fn update_value(&mut self, id: FieldId, value: FieldValue) -> Result<()> {
        self.state.set_value(id, value)
    }

    pub fn on_submit<R: Renderer, S: Scheduler>(
        &mut self,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> SubmitOutcome {
        if self.config.cancel_pending_dismissal {
            self.dismissal.cancel(scheduler);
        }

        let messages = &self.config.messages;
        let value = self
            .state
            .field(self.email)
            .map(|f| f.value.text().to_string())
            .unwrap_or_default();
        let result = evaluate_email_only(&value, messages);

        match result.message {
            Some(message) if !result.is_valid => {
                if self.config.cancel_pending_dismissal {
                    // The cancelled dismissal would have removed it
                    self.state.hide_banner(renderer);
                }
                // The email id was found at construction, so this cannot fail
                let _ = self.state.show_field_error(self.email, &message, renderer);
                debug!(form = "newsletter", "submission rejected");
                SubmitOutcome::Rejected {
                    first_invalid: Some(self.email),
                }
            }
            _ => {
                self.state
                    .show_banner(BannerKind::Success, &messages.newsletter_success, renderer);
                self.dismissal.arm(
                    scheduler,
                    self.config.dismiss_delay(),
                    self.config.cancel_pending_dismissal,
                );
                self.state.reset(renderer);
                debug!(form = "newsletter", "submission accepted");
                SubmitOutcome::Accepted
            }
        }
    }

    /// A dismissal delay elapsed: reset the form and drop the banner
    pub fn on_dismiss<R: Renderer>(&mut self, task: TaskId, renderer: &mut R) -> bool {
        if !self.dismissal.fire(task, self.config.cancel_pending_dismissal) {
            debug!(form = "newsletter", task = task.0, "stale dismissal ignored");
            return false;
        }
        self.state.reset(renderer);
        self.state.hide_banner(renderer);
        true
    }
}
