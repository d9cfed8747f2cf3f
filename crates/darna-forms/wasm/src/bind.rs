// File: src/bind.rs
// Purpose: Attach the form pipelines to the live page

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use darna_forms_core::effects::{focused_after, FocusEvent, FOCUSED_CLASS};
use darna_forms_core::{
    ContactForm, FieldId, FormsConfig, NewsletterForm, PasswordVisibility, TaskId,
};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlFormElement, HtmlInputElement, Window};

use crate::dom::{self, Control, CONTROL_SELECTOR};
use crate::renderer::DomRenderer;
use crate::timer::BrowserScheduler;

/// Register `handler` for `event` for the lifetime of the page
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `f` on the binding unless a handler further up the stack holds it.
///
/// Focusing a field during submit fires `blur` on the previous one
/// synchronously; that nested event is dropped.
fn with_binding<B>(binding: &Weak<RefCell<B>>, event: &str, f: impl FnOnce(&mut B)) {
    let Some(binding) = binding.upgrade() else {
        return;
    };
    match binding.try_borrow_mut() {
        Ok(mut binding) => f(&mut *binding),
        Err(_) => debug!(event, "nested event skipped"),
    };
}

/// Scheduler whose deliveries go back into `B`'s dismissal handler
fn scheduler_for<B: 'static>(
    window: &Window,
    weak: &Weak<RefCell<B>>,
    dismiss: fn(&mut B, TaskId),
) -> BrowserScheduler {
    let weak = weak.clone();
    let on_fire: Rc<dyn Fn(TaskId)> =
        Rc::new(move |id| with_binding(&weak, "dismiss", |b| dismiss(b, id)));
    BrowserScheduler::new(window.clone(), on_fire)
}

struct ContactBinding {
    form: ContactForm,
    renderer: DomRenderer,
    scheduler: BrowserScheduler,
}

impl ContactBinding {
    fn sync(&mut self, id: FieldId) {
        if let Some(control) = self.renderer.controls().get(id.0) {
            if let Err(err) = self.form.update_value(id, control.value()) {
                warn!(error = %err, "could not read field");
            }
        }
    }

    fn submit(&mut self) {
        for index in 0..self.renderer.controls().len() {
            self.sync(FieldId(index));
        }
        self.form.on_submit(&mut self.renderer, &mut self.scheduler);
    }

    fn blur(&mut self, id: FieldId) {
        self.sync(id);
        if let Err(err) = self.form.on_blur(id, &mut self.renderer) {
            warn!(error = %err, "blur validation failed");
        }
    }

    fn input(&mut self, id: FieldId) {
        let Some(value) = self.renderer.controls().get(id.0).map(Control::value) else {
            return;
        };
        if let Err(err) = self.form.on_input(id, value, &mut self.renderer) {
            warn!(error = %err, "input handling failed");
        }
    }

    fn dismiss(&mut self, id: TaskId) {
        self.scheduler.delivered(id);
        self.form.on_dismiss(id, &mut self.renderer);
    }
}

/// Wire the contact form; returns whether one was found
fn bind_contact_form(
    window: &Window,
    document: &Document,
    config: &Arc<FormsConfig>,
) -> Result<bool, JsValue> {
    let Some(element) = document.get_element_by_id(&config.selectors.contact_form_id) else {
        return Ok(false);
    };
    let form: HtmlFormElement = element.dyn_into()?;
    let controls = dom::controls(&form);
    let fields = controls.iter().map(Control::field).collect();

    let binding = Rc::new_cyclic(|weak: &Weak<RefCell<ContactBinding>>| {
        RefCell::new(ContactBinding {
            form: ContactForm::new(fields, Arc::clone(config)),
            renderer: DomRenderer::new(document.clone(), form.clone(), controls.clone()),
            scheduler: scheduler_for(window, weak, ContactBinding::dismiss),
        })
    });

    let weak = Rc::downgrade(&binding);
    listen(&form, "submit", move |event| {
        event.prevent_default();
        with_binding(&weak, "submit", ContactBinding::submit);
    })?;

    for (index, control) in controls.iter().enumerate() {
        let id = FieldId(index);
        let weak = Rc::downgrade(&binding);
        listen(control.element(), "blur", move |_| {
            with_binding(&weak, "blur", |b| b.blur(id));
        })?;
        let weak = Rc::downgrade(&binding);
        listen(control.element(), "input", move |_| {
            with_binding(&weak, "input", |b| b.input(id));
        })?;
    }

    // Listeners hold weak references; the page keeps the binding alive
    std::mem::forget(binding);
    Ok(true)
}

struct NewsletterBinding {
    form: NewsletterForm,
    renderer: DomRenderer,
    scheduler: BrowserScheduler,
}

impl NewsletterBinding {
    fn submit(&mut self) {
        let id = self.form.email_field();
        if let Some(control) = self.renderer.controls().get(id.0) {
            if let Err(err) = self.form.update_value(id, control.value()) {
                warn!(error = %err, "could not read email field");
            }
        }
        self.form.on_submit(&mut self.renderer, &mut self.scheduler);
    }

    fn dismiss(&mut self, id: TaskId) {
        self.scheduler.delivered(id);
        self.form.on_dismiss(id, &mut self.renderer);
    }
}

/// Wire every newsletter form; returns how many were bound
fn bind_newsletter_forms(
    window: &Window,
    document: &Document,
    config: &Arc<FormsConfig>,
) -> Result<usize, JsValue> {
    let selector = format!(".{}", config.selectors.newsletter_form_class);
    let nodes = document.query_selector_all(&selector)?;
    let mut bound = 0;

    for i in 0..nodes.length() {
        let Some(form) = nodes
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlFormElement>().ok())
        else {
            continue;
        };
        let controls = dom::controls(&form);
        let fields = controls.iter().map(Control::field).collect();
        let newsletter = match NewsletterForm::new(fields, Arc::clone(config)) {
            Ok(newsletter) => newsletter,
            Err(err) => {
                warn!(form = i, error = %err, "newsletter form not validated");
                // Still keep the page from navigating away
                listen(&form, "submit", |event| event.prevent_default())?;
                continue;
            }
        };

        let binding = Rc::new_cyclic(|weak: &Weak<RefCell<NewsletterBinding>>| {
            RefCell::new(NewsletterBinding {
                form: newsletter,
                renderer: DomRenderer::new(document.clone(), form.clone(), controls),
                scheduler: scheduler_for(window, weak, NewsletterBinding::dismiss),
            })
        });

        let weak = Rc::downgrade(&binding);
        listen(&form, "submit", move |event| {
            event.prevent_default();
            with_binding(&weak, "submit", NewsletterBinding::submit);
        })?;

        std::mem::forget(binding);
        bound += 1;
    }
    Ok(bound)
}

fn decorate(control: &Control, event: FocusEvent) {
    let Some(parent) = control.element().parent_element() else {
        return;
    };
    let result = match focused_after(event, &control.raw_value()) {
        Some(true) => parent.class_list().add_1(FOCUSED_CLASS),
        Some(false) => parent.class_list().remove_1(FOCUSED_CLASS),
        None => Ok(()),
    };
    if let Err(err) = result {
        warn!(error = ?err, "focus decoration failed");
    }
}

/// Toggle `focused` on the wrapper of every control in the page
fn bind_focus_effects(document: &Document) -> Result<usize, JsValue> {
    let nodes = document.query_selector_all(CONTROL_SELECTOR)?;
    let controls: Vec<Control> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(Control::from_element)
        .collect();

    for control in &controls {
        let focused = control.clone();
        listen(control.element(), "focus", move |_| {
            decorate(&focused, FocusEvent::Focus)
        })?;
        let blurred = control.clone();
        listen(control.element(), "blur", move |_| {
            decorate(&blurred, FocusEvent::Blur)
        })?;
        decorate(control, FocusEvent::Load);
    }
    Ok(controls.len())
}

fn toggle_password(button: &Element) -> Result<(), JsValue> {
    let Some(input) = button
        .previous_element_sibling()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };
    let next = PasswordVisibility::from_input_type(&input.type_()).toggled();
    input.set_type(next.input_type());
    button.set_text_content(Some(next.button_label()));
    button.set_attribute("aria-label", next.aria_label())
}

fn bind_password_toggles(document: &Document, config: &FormsConfig) -> Result<usize, JsValue> {
    let selector = format!(".{}", config.selectors.password_toggle_class);
    let nodes = document.query_selector_all(&selector)?;
    let mut bound = 0;

    for i in 0..nodes.length() {
        let Some(button) = nodes
            .item(i)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let target = button.clone();
        listen(&button, "click", move |_| {
            if let Err(err) = toggle_password(&target) {
                warn!(error = ?err, "password toggle failed");
            }
        })?;
        bound += 1;
    }
    Ok(bound)
}

thread_local! {
    static BOUND: Cell<bool> = const { Cell::new(false) };
}

/// Bind every form behavior present in the current document
///
/// Only the first call binds; later ones are ignored.
pub fn init_page(config: FormsConfig) -> Result<(), JsValue> {
    if BOUND.with(|bound| bound.replace(true)) {
        debug!("page already bound");
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = Arc::new(config);

    let contact = bind_contact_form(&window, &document, &config)?;
    let newsletters = bind_newsletter_forms(&window, &document, &config)?;
    let inputs = bind_focus_effects(&document)?;
    let toggles = bind_password_toggles(&document, &config)?;

    info!(contact, newsletters, inputs, toggles, "form validation ready");
    Ok(())
}

/// Bind with the default configuration once the document is parsed
///
/// Binds right away when the module loads after `DOMContentLoaded`.
#[cfg(feature = "auto-init")]
pub fn init_on_load() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() != "loading" {
        return init_page(FormsConfig::default());
    }
    listen(&document, "DOMContentLoaded", |_| {
        if let Err(err) = init_page(FormsConfig::default()) {
            warn!(error = ?err, "form validation not initialised");
        }
    })
}
