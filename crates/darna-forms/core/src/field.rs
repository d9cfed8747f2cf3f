// File: src/field.rs
// Purpose: Field descriptors read from form controls

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a field inside its form (DOM order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub usize);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared control type, as reported by the element's `type` property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Email,
    Tel,
    Url,
    Checkbox,
    SelectOne,
    /// Text, textarea, password and anything else without a type check
    #[serde(untagged)]
    Other(String),
}

impl FieldKind {
    pub fn from_dom_type(ty: &str) -> Self {
        match ty.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "checkbox" => Self::Checkbox,
            "select-one" => Self::SelectOne,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Default for FieldKind {
    fn default() -> Self {
        Self::Other("text".to_string())
    }
}

/// Current value of a control
///
/// Checkboxes keep their `value` attribute (usually `"on"`) next to the
/// checked flag, so the required-blank check sees what a browser would.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checkbox { checked: bool, value: String },
}

impl FieldValue {
    pub fn checkbox(checked: bool) -> Self {
        Self::Checkbox {
            checked,
            value: "on".to_string(),
        }
    }

    /// The string value as the control reports it
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Checkbox { value, .. } => value,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, Self::Checkbox { checked: true, .. })
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Optional constraints from `required` and the `data-*` attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Regular-expression source from `data-pattern`
    #[serde(default)]
    pub pattern: Option<String>,
}

impl Constraints {
    /// Parse a `data-min-length` / `data-max-length` attribute.
    ///
    /// Leading whitespace is skipped and the leading digit run is used, so
    /// `"10 chars"` reads as 10. Anything without digits yields `None`.
    pub fn parse_length(raw: &str) -> Option<usize> {
        let digits: String = raw
            .trim_start()
            .trim_start_matches('+')
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

/// One form control subject to validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// `name` attribute, falling back to `id`
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub value: FieldValue,
    #[serde(flatten)]
    pub constraints: Constraints,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let value = match kind {
            FieldKind::Checkbox => FieldValue::checkbox(false),
            _ => FieldValue::default(),
        };
        Self {
            name: name.into(),
            kind,
            value,
            constraints: Constraints::default(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::default())
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = match self.value {
            FieldValue::Checkbox { checked, .. } => FieldValue::Checkbox {
                checked,
                value: value.into(),
            },
            FieldValue::Text(_) => FieldValue::Text(value.into()),
        };
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.value = match self.value {
            FieldValue::Checkbox { value, .. } => FieldValue::Checkbox { checked, value },
            FieldValue::Text(_) => FieldValue::checkbox(checked),
        };
        self
    }

    pub fn trimmed_value(&self) -> &str {
        self.value.text().trim()
    }
}
