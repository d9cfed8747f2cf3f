//! Darna Forms WASM
//!
//! WebAssembly bindings for the Darna Ferme form validation.
//! Binds the contact and newsletter forms of the page to the core pipelines
//! and exposes the standalone validators to JavaScript.

use darna_forms_core as core;
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod bind;
pub mod dom;
mod logging;
pub mod renderer;
pub mod timer;

/// Set panic hook and console logging
///
/// With the `auto-init` feature (on by default) the forms are bound with the
/// default configuration on `DOMContentLoaded`. Pages that need
/// `initFormValidationWithConfig` build without it, since only the first
/// binding takes effect.
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
    #[cfg(feature = "auto-init")]
    bind::init_on_load()?;
    Ok(())
}

/// Bind every form on the page with the default configuration
///
/// Not needed with `auto-init`; a second binding is ignored.
///
/// # Example (JavaScript)
/// ```javascript
/// document.addEventListener('DOMContentLoaded', () => initFormValidation());
/// ```
#[wasm_bindgen(js_name = initFormValidation)]
pub fn init_form_validation() -> Result<(), JsValue> {
    bind::init_page(core::FormsConfig::default())
}

/// Bind every form on the page with a custom configuration
///
/// # Example (JavaScript)
/// ```javascript
/// initFormValidationWithConfig({
///     dismiss_delay_ms: 3000,
///     messages: { required: 'This field is required.' },
///     selectors: { contact_form_id: 'contact' }
/// });
/// ```
#[wasm_bindgen(js_name = initFormValidationWithConfig)]
pub fn init_form_validation_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: core::FormsConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    bind::init_page(config)
}

/// Evaluate a field descriptor without touching the page
///
/// # Example (JavaScript)
/// ```javascript
/// const result = evaluateField({
///     name: 'email', type: 'email', value: 'user@example.com', required: true
/// });
/// // { isValid: true, failure: null, message: null }
/// ```
#[wasm_bindgen(js_name = evaluateField)]
pub fn evaluate_field(descriptor: JsValue) -> Result<JsValue, JsValue> {
    let field: core::Field = serde_wasm_bindgen::from_value(descriptor)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse field: {}", e)))?;
    let result = core::evaluate(&field, &core::Messages::default());
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(result.serialize(&serializer)?)
}

/// Quick email validation
#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    core::is_valid_email(email)
}

/// Quick phone validation
#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone(phone: &str) -> bool {
    core::is_valid_phone(phone)
}

/// Quick URL validation
#[wasm_bindgen(js_name = validateURL)]
pub fn validate_url(url: &str) -> bool {
    core::is_valid_url(url)
}

/// Escape text before inserting it as HTML
#[wasm_bindgen(js_name = sanitizeInput)]
pub fn sanitize_input(input: &str) -> String {
    core::sanitize_input(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_email_validation() {
        assert!(validate_email("user@example.com"));
        assert!(!validate_email("invalid-email"));
    }

    #[wasm_bindgen_test]
    fn test_phone_validation() {
        assert!(validate_phone("+212 612 345 678"));
        assert!(!validate_phone("12-34"));
    }

    #[wasm_bindgen_test]
    fn test_url_validation() {
        assert!(validate_url("https://example.com"));
        assert!(!validate_url("not-a-url"));
    }

    #[wasm_bindgen_test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("<b>"), "&lt;b&gt;");
        assert_eq!(sanitize_input("l'été"), "l'été");
    }
}
