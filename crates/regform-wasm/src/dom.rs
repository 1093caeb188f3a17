//! Browser surface: reads controls into a headless [`Form`] and mirrors its change journal

use std::collections::HashMap;

use regform::validation::format_iso;
use regform::{DocumentConfig, Field, FieldKind, FieldStatus, Form, FormChange};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

const ERROR_CLASS: &str = "error-msg";
const VALID_CLASS: &str = "valid";
const INVALID_CLASS: &str = "invalid";
/// Names the control an error node belongs to
const OWNER_ATTR: &str = "data-for";
/// Set on the form once listeners are bound
const BOUND_ATTR: &str = "data-regform";

/// The registration page's elements
pub struct Page {
    document: Document,
    form: HtmlElement,
    success: Element,
    success_class: String,
    controls: Vec<(String, Element)>,
}

impl Page {
    /// Looks up the form and success elements; `None` when either is missing
    pub fn locate(document: Document, ids: &DocumentConfig) -> Result<Option<Self>, JsValue> {
        let Some(form) = document.get_element_by_id(&ids.form_id) else {
            return Ok(None);
        };
        let Some(success) = document.get_element_by_id(&ids.success_id) else {
            return Ok(None);
        };
        let form: HtmlElement = form
            .dyn_into()
            .map_err(|_| JsValue::from_str("form element is not an HTML element"))?;

        let nodes = form.query_selector_all("input, select")?;
        let mut controls: Vec<(String, Element)> = Vec::new();
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(name) = element.get_attribute("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if controls.iter().any(|(existing, _)| *existing == name) {
                web_sys::console::warn_1(&format!("regform: ignoring duplicate control '{}'", name).into());
                continue;
            }
            controls.push((name, element));
        }

        Ok(Some(Self {
            document,
            form,
            success,
            success_class: ids.success_class.clone(),
            controls,
        }))
    }

    /// Builds the headless form from the controls' names, types and `required` attributes
    pub fn build_form(&self) -> Result<Form, JsValue> {
        let fields = self
            .controls
            .iter()
            .map(|(name, element)| {
                let field = Field::new(name.as_str(), control_kind(element))
                    .with_value(control_value(element));
                if element.has_attribute("required") {
                    field.required()
                } else {
                    field
                }
            })
            .collect();
        Form::new(fields).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn form_element(&self) -> &HtmlElement {
        &self.form
    }

    /// Whether listeners were already bound to this form
    pub fn is_bound(&self) -> bool {
        self.form.has_attribute(BOUND_ATTR)
    }

    pub fn mark_bound(&self) -> Result<(), JsValue> {
        self.form.set_attribute(BOUND_ATTR, "bound")
    }

    pub fn controls(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.controls.iter().map(|(name, el)| (name.as_str(), el))
    }

    /// Current value of a named control
    pub fn value_of(&self, name: &str) -> Option<String> {
        self.control(name).map(control_value)
    }

    fn control(&self, name: &str) -> Option<&Element> {
        self.controls
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, el)| el)
    }

    /// Applies journaled changes to the document
    pub fn apply(&self, changes: Vec<FormChange>) -> Result<(), JsValue> {
        for change in changes {
            match change {
                FormChange::Status { field, status } => {
                    if let Some(control) = self.control(&field) {
                        self.render_status(&field, control, &status)?;
                    }
                }
                FormChange::Focus {
                    field,
                    scroll_into_view,
                } => {
                    if let Some(control) = self.control(&field) {
                        focus(control, scroll_into_view)?;
                    }
                }
                FormChange::DateMax { field, max } => {
                    if let Some(control) = self.control(&field) {
                        control.set_attribute("max", &format_iso(max))?;
                    }
                }
                FormChange::Submitted => {
                    self.form.style().set_property("display", "none")?;
                    self.success.class_list().add_1(&self.success_class)?;
                }
            }
        }
        Ok(())
    }

    /// Clear-before-append keeps at most one error node per control
    ///
    /// Error nodes are tagged with the control's name, so controls sharing a
    /// wrapper never remove each other's messages.
    fn render_status(&self, name: &str, control: &Element, status: &FieldStatus) -> Result<(), JsValue> {
        let parent = control.parent_element();
        if let Some(parent) = &parent {
            remove_error_nodes(parent, name)?;
        }

        let classes = control.class_list();
        classes.remove_1(INVALID_CLASS)?;

        match status {
            FieldStatus::Unset => classes.remove_1(VALID_CLASS)?,
            FieldStatus::Valid => classes.add_1(VALID_CLASS)?,
            FieldStatus::Invalid(err) => {
                if let Some(parent) = &parent {
                    let node = self.document.create_element("small")?;
                    node.set_class_name(ERROR_CLASS);
                    node.set_attribute(OWNER_ATTR, name)?;
                    node.set_text_content(Some(&err.to_string()));
                    parent.append_child(&node)?;
                }
                classes.add_1(INVALID_CLASS)?;
                classes.remove_1(VALID_CLASS)?;
            }
        }
        Ok(())
    }
}

fn remove_error_nodes(parent: &Element, name: &str) -> Result<(), JsValue> {
    // querySelectorAll is a static snapshot, so removing while iterating is fine
    let nodes = parent.query_selector_all(&format!(".{}", ERROR_CLASS))?;
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if node.get_attribute(OWNER_ATTR).as_deref() == Some(name) {
            node.remove();
        }
    }
    Ok(())
}

fn control_kind(element: &Element) -> FieldKind {
    if element.tag_name().eq_ignore_ascii_case("select") {
        FieldKind::Select
    } else {
        FieldKind::from_input_type(&element.get_attribute("type").unwrap_or_default())
    }
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

fn focus(control: &Element, scroll_into_view: bool) -> Result<(), JsValue> {
    if let Some(control) = control.dyn_ref::<HtmlElement>() {
        control.focus()?;
    }
    if scroll_into_view {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        control.scroll_into_view_with_scroll_into_view_options(&options);
    }
    Ok(())
}
