// File: src/config.rs
// Purpose: Configuration parsing from darna-forms.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::messages::Messages;

/// Form behavior configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default)]
    pub messages: Messages,

    /// Delay before a success banner is dismissed and the form reset
    #[serde(default = "default_dismiss_delay_ms")]
    pub dismiss_delay_ms: u64,

    /// Whether a new submission cancels a dismissal still pending
    #[serde(default = "default_true")]
    pub cancel_pending_dismissal: bool,

    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Where the forms live in the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Element id of the primary contact form
    #[serde(default = "default_contact_form_id")]
    pub contact_form_id: String,

    /// Class shared by every newsletter form
    #[serde(default = "default_newsletter_form_class")]
    pub newsletter_form_class: String,

    /// Class of the show/hide password buttons
    #[serde(default = "default_password_toggle_class")]
    pub password_toggle_class: String,
}

// Default values
fn default_dismiss_delay_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_contact_form_id() -> String {
    "contactForm".to_string()
}

fn default_newsletter_form_class() -> String {
    "newsletter-form".to_string()
}

fn default_password_toggle_class() -> String {
    "password-toggle".to_string()
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            messages: Messages::default(),
            dismiss_delay_ms: default_dismiss_delay_ms(),
            cancel_pending_dismissal: true,
            selectors: SelectorConfig::default(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            contact_form_id: default_contact_form_id(),
            newsletter_form_class: default_newsletter_form_class(),
            password_toggle_class: default_password_toggle_class(),
        }
    }
}

impl FormsConfig {
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }

    /// Parse configuration from TOML text; blank text yields the defaults
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./darna-forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("darna-forms.toml")
    }
}
