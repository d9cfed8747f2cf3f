//! Email and telephone format checks

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld with no whitespace or extra '@' in any part
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

// +33 (123) 456-7890 style numbers, checked after whitespace is removed
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("phone regex is valid")
});

/// Validates `local@domain.tld` shape
///
/// The value is checked as given; callers trim first when they want to.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validates a telephone number, ignoring every whitespace character
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_REGEX.is_match(&compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        assert!(is_valid_email("contact@darna-ferme.ma"));
        // Looser than RFC: any non-space, non-@ characters are accepted
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("user@example..com"));
    }

    #[rstest]
    #[case("")]
    #[case("not-an-email")]
    #[case("@example.com")]
    #[case("user@")]
    #[case("user@@example.com")]
    #[case("user@example")]
    #[case("user name@example.com")]
    #[case("user@exa mple.com")]
    #[case("user@example.")]
    #[case(" user@example.com")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[rstest]
    #[case("0612345678")]
    #[case("061 234 5678")]
    #[case("+212 612 345 678")]
    #[case("(061)234-5678")]
    #[case("061.234.567890")]
    #[case("  061 234 5678  ")]
    fn test_valid_phones(#[case] phone: &str) {
        assert!(is_valid_phone(phone));
    }

    #[rstest]
    #[case("")]
    #[case("12345")]
    #[case("06-12-34-56-78")]
    #[case("abc1234567")]
    #[case("++0612345678")]
    #[case("06123456789012")]
    fn test_invalid_phones(#[case] phone: &str) {
        assert!(!is_valid_phone(phone));
    }
}
