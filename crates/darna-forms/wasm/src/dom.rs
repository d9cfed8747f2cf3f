// File: src/dom.rs
// Purpose: Read field descriptors from form controls

use darna_forms_core::{Constraints, Field, FieldKind, FieldValue};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Selector for every validated control of a form
pub const CONTROL_SELECTOR: &str = "input, textarea, select";

/// An `input`, `textarea` or `select` element
#[derive(Debug, Clone)]
pub enum Control {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl Control {
    pub fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Self::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Some(Self::TextArea(area)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlSelectElement>().ok().map(Self::Select)
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            Self::Input(el) => el,
            Self::TextArea(el) => el,
            Self::Select(el) => el,
        }
    }

    pub fn dom_type(&self) -> String {
        match self {
            Self::Input(el) => el.type_(),
            Self::TextArea(el) => el.type_(),
            Self::Select(el) => el.type_(),
        }
    }

    pub fn value(&self) -> FieldValue {
        match self {
            Self::Input(el) if el.type_().eq_ignore_ascii_case("checkbox") => {
                FieldValue::Checkbox {
                    checked: el.checked(),
                    value: el.value(),
                }
            }
            Self::Input(el) => FieldValue::Text(el.value()),
            Self::TextArea(el) => FieldValue::Text(el.value()),
            Self::Select(el) => FieldValue::Text(el.value()),
        }
    }

    /// Raw string value, as the `focused` decoration looks at it
    pub fn raw_value(&self) -> String {
        match self {
            Self::Input(el) => el.value(),
            Self::TextArea(el) => el.value(),
            Self::Select(el) => el.value(),
        }
    }

    /// `name` attribute, falling back to `id`
    pub fn name(&self) -> String {
        let element = self.element();
        element
            .get_attribute("name")
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| element.id())
    }

    pub fn field(&self) -> Field {
        let element = self.element();
        Field {
            name: self.name(),
            kind: FieldKind::from_dom_type(&self.dom_type()),
            value: self.value(),
            constraints: Constraints {
                required: element.has_attribute("required"),
                min_length: length_attr(element, "data-min-length"),
                max_length: length_attr(element, "data-max-length"),
                pattern: element.get_attribute("data-pattern"),
            },
        }
    }
}

fn length_attr(element: &HtmlElement, attr: &str) -> Option<usize> {
    let raw = element.get_attribute(attr)?;
    let parsed = Constraints::parse_length(&raw);
    if parsed.is_none() {
        warn!(attr, value = %raw, "ignoring unreadable length constraint");
    }
    parsed
}

/// Validated controls of `form` in DOM order
pub fn controls(form: &HtmlFormElement) -> Vec<Control> {
    let Ok(nodes) = form.query_selector_all(CONTROL_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(Control::from_element)
        .collect()
}
