// File: src/validator.rs
// Purpose: Pure field evaluation, independent of any rendering

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::email::{is_valid_email, is_valid_phone};
use crate::field::{Field, FieldKind};
use crate::messages::Messages;
use crate::string::{is_too_long, is_too_short, is_valid_url, matches_pattern};

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationFailure {
    Required,
    InvalidEmail,
    InvalidPhone,
    InvalidUrl,
    Unchecked,
    NoSelection,
    TooShort { min: usize },
    TooLong { max: usize },
    PatternMismatch,
}

impl ValidationFailure {
    pub fn message(&self, messages: &Messages) -> String {
        match self {
            Self::Required => messages.required.clone(),
            Self::InvalidEmail => messages.invalid_email.clone(),
            Self::InvalidPhone => messages.invalid_phone.clone(),
            Self::InvalidUrl => messages.invalid_url.clone(),
            Self::Unchecked => messages.unchecked.clone(),
            Self::NoSelection => messages.no_selection.clone(),
            Self::TooShort { min } => messages.too_short(*min),
            Self::TooLong { max } => messages.too_long(*max),
            Self::PatternMismatch => messages.pattern_mismatch.clone(),
        }
    }
}

/// Outcome of checking one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub failure: Option<ValidationFailure>,
    pub message: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            failure: None,
            message: None,
        }
    }

    /// Create a failed validation result with its display message
    pub fn failure(failure: ValidationFailure, messages: &Messages) -> Self {
        Self {
            is_valid: false,
            message: Some(failure.message(messages)),
            failure: Some(failure),
        }
    }

    fn from_check(check: Result<(), ValidationFailure>, messages: &Messages) -> Self {
        match check {
            Ok(()) => Self::success(),
            Err(failure) => Self::failure(failure, messages),
        }
    }
}

/// Run the field pipeline and stop at the first failing check
pub fn evaluate(field: &Field, messages: &Messages) -> ValidationResult {
    ValidationResult::from_check(check(field), messages)
}

/// Newsletter check: email format only, on the untrimmed value
pub fn evaluate_email_only(value: &str, messages: &Messages) -> ValidationResult {
    if is_valid_email(value) {
        ValidationResult::success()
    } else {
        ValidationResult::failure(ValidationFailure::InvalidEmail, messages)
    }
}

fn check(field: &Field) -> Result<(), ValidationFailure> {
    let value = field.trimmed_value();
    let constraints = &field.constraints;

    if constraints.required && value.is_empty() {
        return Err(ValidationFailure::Required);
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => return Err(ValidationFailure::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => return Err(ValidationFailure::InvalidPhone),
        FieldKind::Url if !is_valid_url(value) => return Err(ValidationFailure::InvalidUrl),
        FieldKind::Checkbox if constraints.required && !field.value.is_checked() => {
            return Err(ValidationFailure::Unchecked)
        }
        FieldKind::SelectOne if constraints.required && value.is_empty() => {
            return Err(ValidationFailure::NoSelection)
        }
        _ => {}
    }

    if let Some(min) = constraints.min_length {
        if is_too_short(value, min) {
            return Err(ValidationFailure::TooShort { min });
        }
    }

    if let Some(max) = constraints.max_length {
        if is_too_long(value, max) {
            return Err(ValidationFailure::TooLong { max });
        }
    }

    if let Some(ref pattern) = constraints.pattern {
        match matches_pattern(value, pattern) {
            Ok(true) => {}
            Ok(false) => return Err(ValidationFailure::PatternMismatch),
            Err(err) => {
                warn!(field = %field.name, "{}", err);
                return Err(ValidationFailure::PatternMismatch);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn messages() -> Messages {
        Messages::default()
    }

    fn failure_of(field: &Field) -> Option<ValidationFailure> {
        evaluate(field, &messages()).failure
    }

    #[rstest]
    #[case(Field::text("name"))]
    #[case(Field::email("email"))]
    #[case(Field::new("phone", FieldKind::Tel))]
    #[case(Field::new("site", FieldKind::Url))]
    #[case(Field::new("topic", FieldKind::SelectOne))]
    #[case(Field::text("message").min_length(10).pattern("^x"))]
    fn test_required_blank_fails_for_every_type(#[case] field: Field) {
        for blank in ["", "   ", "\t\n"] {
            let field = field.clone().required().with_value(blank);
            let result = evaluate(&field, &messages());
            assert_eq!(
                result,
                ValidationResult {
                    is_valid: false,
                    failure: Some(ValidationFailure::Required),
                    message: Some("Ce champ est obligatoire.".to_string()),
                }
            );
        }
    }

    #[test]
    fn test_required_blank_checkbox_value() {
        let field = Field::new("terms", FieldKind::Checkbox)
            .required()
            .with_value(" ")
            .checked(true);
        assert_eq!(failure_of(&field), Some(ValidationFailure::Required));
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("user@example")]
    #[case("user name@example.com")]
    #[case("user@@example.com")]
    fn test_email_type_mismatch(#[case] value: &str) {
        let field = Field::email("email").with_value(value);
        let result = evaluate(&field, &messages());
        assert!(!result.is_valid);
        assert_eq!(
            result.message.as_deref(),
            Some("Veuillez entrer une adresse email valide.")
        );
    }

    #[test]
    fn test_email_is_trimmed_before_check() {
        let field = Field::email("email").with_value("  user@example.com  ");
        assert!(evaluate(&field, &messages()).is_valid);
    }

    #[test]
    fn test_optional_blank_email_still_checked() {
        // Type checks run on blank optional values too
        let field = Field::email("email");
        assert_eq!(failure_of(&field), Some(ValidationFailure::InvalidEmail));
    }

    #[test]
    fn test_phone_and_url_checks() {
        let phone = Field::new("phone", FieldKind::Tel).with_value("061 234 5678");
        assert!(evaluate(&phone, &messages()).is_valid);
        let phone = phone.with_value("12-34");
        assert_eq!(failure_of(&phone), Some(ValidationFailure::InvalidPhone));

        let url = Field::new("site", FieldKind::Url).with_value("https://darna.example");
        assert!(evaluate(&url, &messages()).is_valid);
        let url = url.with_value("darna.example");
        assert_eq!(failure_of(&url), Some(ValidationFailure::InvalidUrl));
    }

    #[test]
    fn test_checkbox_required_unchecked() {
        let terms = Field::new("terms", FieldKind::Checkbox).required();
        let result = evaluate(&terms, &messages());
        assert_eq!(result.failure, Some(ValidationFailure::Unchecked));
        assert_eq!(
            result.message.as_deref(),
            Some("Vous devez accepter cette condition.")
        );

        assert!(evaluate(&terms.clone().checked(true), &messages()).is_valid);
        // Optional checkboxes may stay unchecked
        let optional = Field::new("news", FieldKind::Checkbox);
        assert!(evaluate(&optional, &messages()).is_valid);
    }

    #[test]
    fn test_select_without_choice() {
        let optional = Field::new("topic", FieldKind::SelectOne);
        assert!(evaluate(&optional, &messages()).is_valid);

        let chosen = Field::new("topic", FieldKind::SelectOne)
            .required()
            .with_value("visite");
        assert!(evaluate(&chosen, &messages()).is_valid);
    }

    #[test]
    fn test_length_constraints() {
        let field = Field::text("name").min_length(3).max_length(5);

        let short = evaluate(&field.clone().with_value(" ab "), &messages());
        assert_eq!(short.failure, Some(ValidationFailure::TooShort { min: 3 }));
        assert_eq!(
            short.message.as_deref(),
            Some("Ce champ doit contenir au moins 3 caractères.")
        );

        let long = evaluate(&field.clone().with_value("abcdef"), &messages());
        assert_eq!(long.failure, Some(ValidationFailure::TooLong { max: 5 }));
        assert_eq!(
            long.message.as_deref(),
            Some("Ce champ ne peut pas dépasser 5 caractères.")
        );

        assert!(evaluate(&field.with_value("  abcd  "), &messages()).is_valid);
    }

    #[test]
    fn test_type_check_runs_before_length() {
        let field = Field::email("email").min_length(50).with_value("nope");
        assert_eq!(failure_of(&field), Some(ValidationFailure::InvalidEmail));
    }

    #[test]
    fn test_pattern_constraint() {
        let field = Field::text("code").pattern(r"^\d{5}$");
        assert!(evaluate(&field.clone().with_value(" 20250 "), &messages()).is_valid);

        let result = evaluate(&field.with_value("2025"), &messages());
        assert_eq!(result.failure, Some(ValidationFailure::PatternMismatch));
        assert_eq!(result.message.as_deref(), Some("Le format saisi est incorrect."));
    }

    #[test]
    fn test_malformed_pattern_rejects_value() {
        let field = Field::text("code").pattern("(unclosed").with_value("anything");
        assert_eq!(failure_of(&field), Some(ValidationFailure::PatternMismatch));
    }

    #[test]
    fn test_password_pattern_with_lookahead() {
        let field = Field::text("pwd").pattern(r"^(?=.*\d).{8,}$");
        assert!(evaluate(&field.clone().with_value("motdepasse1"), &messages()).is_valid);
        assert_eq!(
            failure_of(&field.with_value("motdepasse")),
            Some(ValidationFailure::PatternMismatch)
        );
    }

    #[test]
    fn test_pattern_digits_are_ascii_only() {
        let field = Field::text("code").pattern(r"^\d{5}$").with_value("٢٠٢٥٠");
        assert_eq!(failure_of(&field), Some(ValidationFailure::PatternMismatch));
    }

    #[test]
    fn test_max_length_counts_utf16_units() {
        let field = Field::text("name").max_length(3).with_value("🐑🐑");
        assert_eq!(failure_of(&field), Some(ValidationFailure::TooLong { max: 3 }));
        let field = Field::text("name").max_length(4).with_value("🐑🐑");
        assert!(evaluate(&field, &messages()).is_valid);
    }

    #[test]
    fn test_plain_text_passes_without_constraints() {
        assert!(evaluate(&Field::text("free"), &messages()).is_valid);
        assert!(evaluate(&Field::text("free").with_value("anything"), &messages()).is_valid);
    }

    #[test]
    fn test_email_only_is_not_trimmed() {
        assert!(evaluate_email_only("reader@example.com", &messages()).is_valid);
        let result = evaluate_email_only(" reader@example.com", &messages());
        assert_eq!(result.failure, Some(ValidationFailure::InvalidEmail));
    }

    #[test]
    fn test_custom_messages() {
        let messages = Messages {
            required: "Required.".to_string(),
            ..Messages::default()
        };
        let result = evaluate(&Field::text("name").required(), &messages);
        assert_eq!(result.message.as_deref(), Some("Required."));
    }
}
