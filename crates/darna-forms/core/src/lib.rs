//! Darna Forms Core
//!
//! Form validation for the Darna Ferme website, free of any browser API.
//! Fields are evaluated by pure functions, form state tracks each field's
//! status and the banner, and a [`Renderer`] draws the result. The wasm
//! crate supplies the DOM renderer; tests use a recording one.

pub mod config;
pub mod effects;
pub mod email;
pub mod error;
pub mod field;
pub mod form;
pub mod messages;
pub mod password;
pub mod pipeline;
pub mod render;
pub mod schedule;
pub mod string;
pub mod validator;

pub use config::{FormsConfig, SelectorConfig};
pub use email::{is_valid_email, is_valid_phone};
pub use error::{Error, Result};
pub use field::{Constraints, Field, FieldId, FieldKind, FieldValue};
pub use form::{Banner, FieldStatus, FormState};
pub use messages::Messages;
pub use password::PasswordVisibility;
pub use pipeline::{ContactForm, NewsletterForm, SubmitOutcome};
pub use render::{BannerKind, Renderer};
pub use schedule::{DismissalTimer, ManualScheduler, Scheduler, TaskId};
pub use string::{is_valid_url, sanitize_input};
pub use validator::{evaluate, evaluate_email_only, ValidationFailure, ValidationResult};
