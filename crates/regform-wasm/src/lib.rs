//! regform WASM
//!
//! Attaches the registration form validator to the page and exposes the same
//! predicates to JavaScript for ad-hoc checks.

mod console;
mod dom;
#[cfg(test)]
mod fixture;

use std::cell::RefCell;
use std::rc::Rc;

use regform::validation::{is_email, is_phone, is_zip, Verdict};
use regform::{Field, FieldKind, Form, FormEvent, FormValidator, ValidatorConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

use dom::Page;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console::install();
}

/// Attach to `#regForm` / `#successMsg` with the default configuration
///
/// Returns whether the validator was attached. A page without the expected
/// elements is logged and left alone.
#[wasm_bindgen]
pub fn init() -> Result<bool, JsValue> {
    attach(ValidatorConfig::default())
}

/// Same as `init`, with a configuration object
///
/// # Example (JavaScript)
/// ```javascript
/// initWithConfig({
///     rules: { name_policy: 'length-only' },
///     submit: { scroll_into_view: false },
/// });
/// ```
#[wasm_bindgen(js_name = initWithConfig)]
pub fn init_with_config(config: JsValue) -> Result<bool, JsValue> {
    let config: ValidatorConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    attach(config)
}

/// Validate a detached value with the canonical rules
///
/// Returns the inline error message, or `undefined` when the value passes.
///
/// # Example (JavaScript)
/// ```javascript
/// const error = validateValue('zipCode', 'text', true, '110');
/// // "ZIP code must be 4 digits (e.g. 1100)."
/// ```
#[wasm_bindgen(js_name = validateValue)]
pub fn validate_value(name: &str, kind: &str, required: bool, value: &str) -> Option<String> {
    let field = Field::new(name, FieldKind::from_input_type(kind)).with_value(value);
    let field = if required { field.required() } else { field };
    match FormValidator::default().evaluate(&field) {
        Verdict::Failed(err) => Some(err.to_string()),
        Verdict::Passed | Verdict::Skipped => None,
    }
}

/// Quick email validation
#[wasm_bindgen(js_name = isEmail)]
pub fn is_email_js(value: &str) -> bool {
    is_email(value)
}

/// Quick PH mobile number validation
#[wasm_bindgen(js_name = isPhone)]
pub fn is_phone_js(value: &str) -> bool {
    is_phone(value)
}

/// Quick ZIP code validation
#[wasm_bindgen(js_name = isZip)]
pub fn is_zip_js(value: &str) -> bool {
    is_zip(value)
}

/// Headless state shared by the DOM listeners
struct Session {
    form: Form,
    validator: FormValidator,
}

fn attach(config: ValidatorConfig) -> Result<bool, JsValue> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        web_sys::console::error_1(&"regform: no document available".into());
        return Ok(false);
    };
    attach_to(document, &config)
}

fn attach_to(document: Document, config: &ValidatorConfig) -> Result<bool, JsValue> {
    let Some(page) = Page::locate(document, &config.document)? else {
        web_sys::console::error_1(
            &format!(
                "regform: form #{} or success element #{} not found",
                config.document.form_id, config.document.success_id
            )
            .into(),
        );
        return Ok(false);
    };
    if page.is_bound() {
        web_sys::console::warn_1(&"regform: validator already attached".into());
        return Ok(true);
    }

    let mut form = page.build_form()?;
    let validator = FormValidator::new(config);
    validator.attach(&mut form);
    page.apply(form.take_changes())?;

    let page = Rc::new(page);
    let session = Rc::new(RefCell::new(Session { form, validator }));

    for (name, control) in page.controls() {
        for event in ["input", "change", "blur"] {
            let listener = field_listener(Rc::clone(&page), Rc::clone(&session), name, event);
            control.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
            listener.forget();
        }
    }

    let listener = submit_listener(Rc::clone(&page), Rc::clone(&session));
    page.form_element()
        .add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())?;
    listener.forget();

    page.mark_bound()?;
    Ok(true)
}

fn field_listener(
    page: Rc<Page>,
    session: Rc<RefCell<Session>>,
    name: &str,
    event: &'static str,
) -> Closure<dyn FnMut(Event)> {
    let name = name.to_string();
    Closure::new(move |_event: Event| {
        let value = page.value_of(&name).unwrap_or_default();

        // The borrow ends before touching the DOM: focus changes fire blur synchronously
        let changes = {
            let mut session = session.borrow_mut();
            let Session { form, validator } = &mut *session;
            let form_event = match event {
                "input" => FormEvent::Input {
                    field: name.clone(),
                    value,
                },
                "change" => FormEvent::Change {
                    field: name.clone(),
                    value,
                },
                _ => {
                    store_value(form, &name, value);
                    FormEvent::Blur {
                        field: name.clone(),
                    }
                }
            };
            if let Err(err) = validator.dispatch(form, form_event) {
                web_sys::console::error_1(&format!("regform: {}", err).into());
            }
            form.take_changes()
        };
        report(page.apply(changes));
    })
}

fn submit_listener(page: Rc<Page>, session: Rc<RefCell<Session>>) -> Closure<dyn FnMut(Event)> {
    Closure::new(move |event: Event| {
        event.prevent_default();

        let changes = {
            let mut session = session.borrow_mut();
            let Session { form, validator } = &mut *session;
            // pick up values that changed without firing events (autofill)
            for (name, _) in page.controls() {
                if let Some(value) = page.value_of(name) {
                    store_value(form, name, value);
                }
            }
            if let Err(err) = validator.dispatch(form, FormEvent::Submit) {
                web_sys::console::error_1(&format!("regform: {}", err).into());
            }
            form.take_changes()
        };
        report(page.apply(changes));
    })
}

fn store_value(form: &mut Form, name: &str, value: String) {
    if let Err(err) = form.set_value(name, value) {
        web_sys::console::error_1(&format!("regform: {}", err).into());
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        web_sys::console::error_1(&err);
    }
}
