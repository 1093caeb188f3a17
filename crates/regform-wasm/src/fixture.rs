//! A registration page mounted into the test document

use std::cell::Cell;

use regform::ValidatorConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

thread_local! {
    static NEXT_ID: Cell<u32> = const { Cell::new(0) };
}

// firstName and lastName share a wrapper
const PAGE: &str = r#"
<form id="FORM_ID" novalidate>
  <div class="row">
    <input name="firstName" type="text" required>
    <input name="lastName" type="text" required>
  </div>
  <div><input name="middleName" type="text"></div>
  <div><input name="email" type="email" required></div>
  <div><input name="phone" type="tel" required></div>
  <div><input name="dob" type="date" required></div>
  <div><input name="zipCode" type="text" required></div>
  <div><input name="barangay" type="text" required></div>
  <div><input name="city" type="text" required></div>
  <div>
    <select name="province" required>
      <option value="">Select</option>
      <option value="Metro Manila">Metro Manila</option>
    </select>
  </div>
  <div><input name="street" type="text" required></div>
  <button type="submit">Register</button>
</form>
<div id="SUCCESS_ID">Registered!</div>
"#;

const VALID: [(&str, &str); 10] = [
    ("firstName", "Juan"),
    ("lastName", "Dela Cruz"),
    ("email", "juan@email.com"),
    ("phone", "09171234567"),
    ("dob", "2000-01-15"),
    ("zipCode", "1100"),
    ("barangay", "San Isidro"),
    ("city", "Quezon City"),
    ("province", "Metro Manila"),
    ("street", "Rizal Ave"),
];

pub struct Fixture {
    document: Document,
    root: Element,
    config: ValidatorConfig,
}

impl Fixture {
    /// Mounts a fresh page with unique element ids
    pub fn mount() -> Self {
        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        let mut config = ValidatorConfig::default();
        config.document.form_id = format!("regForm{}", id);
        config.document.success_id = format!("successMsg{}", id);

        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            &PAGE
                .replace("FORM_ID", &config.document.form_id)
                .replace("SUCCESS_ID", &config.document.success_id),
        );
        document.body().unwrap().append_child(&root).unwrap();

        Self {
            document,
            root,
            config,
        }
    }

    /// Mounts a page and attaches the validator to it
    pub fn attached() -> Self {
        let fixture = Self::mount();
        assert!(matches!(
            crate::attach_to(fixture.document(), &fixture.config),
            Ok(true)
        ));
        fixture
    }

    pub fn document(&self) -> Document {
        self.document.clone()
    }

    pub fn config(&self) -> ValidatorConfig {
        self.config.clone()
    }

    pub fn control(&self, name: &str) -> Element {
        self.root
            .query_selector(&format!("[name=\"{}\"]", name))
            .unwrap()
            .unwrap()
    }

    pub fn set(&self, name: &str, value: &str) {
        let control = self.control(name);
        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    pub fn fill_valid(&self) {
        for (name, value) in VALID {
            self.set(name, value);
        }
    }

    pub fn fire(&self, name: &str, event: &str) {
        let event = Event::new(event).unwrap();
        self.control(name).dispatch_event(&event).unwrap();
    }

    pub fn submit(&self) {
        let event = Event::new("submit").unwrap();
        self.element(&self.config.document.form_id)
            .dispatch_event(&event)
            .unwrap();
    }

    pub fn error_count(&self) -> u32 {
        self.root.query_selector_all(".error-msg").unwrap().length()
    }

    /// Text of the error node owned by `name`
    pub fn error_for(&self, name: &str) -> Option<String> {
        self.root
            .query_selector(&format!(".error-msg[data-for=\"{}\"]", name))
            .unwrap()
            .and_then(|node| node.text_content())
    }

    pub fn has_class(&self, name: &str, class: &str) -> bool {
        self.control(name).class_list().contains(class)
    }

    pub fn form_hidden(&self) -> bool {
        let form: HtmlElement = self
            .element(&self.config.document.form_id)
            .dyn_into()
            .unwrap();
        form.style().get_property_value("display").unwrap() == "none"
    }

    pub fn success_shown(&self) -> bool {
        self.element(&self.config.document.success_id)
            .class_list()
            .contains(&self.config.document.success_class)
    }

    fn element(&self, id: &str) -> Element {
        self.document.get_element_by_id(id).unwrap()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}
