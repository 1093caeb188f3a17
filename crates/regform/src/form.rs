// File: src/form.rs
// Purpose: Headless form model, listener table and change journal

use chrono::NaiveDate;
use thiserror::Error;

use crate::field::{Field, FieldStatus};

/// Structural misuse of the form API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form has no field named '{0}'")]
    UnknownField(String),

    #[error("form already has a field named '{0}'")]
    DuplicateField(String),
}

/// Whether the form is still being filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    /// Terminal: the form is hidden and the success message shown
    Submitted,
}

/// DOM-level events the form reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Input,
    Change,
    Blur,
    Submit,
}

/// An event delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user typed; carries the control's current value
    Input { field: String, value: String },
    /// The control committed a new value
    Change { field: String, value: String },
    /// Focus left the control
    Blur { field: String },
    Submit,
}

impl FormEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            FormEvent::Input { .. } => EventType::Input,
            FormEvent::Change { .. } => EventType::Change,
            FormEvent::Blur { .. } => EventType::Blur,
            FormEvent::Submit => EventType::Submit,
        }
    }
}

/// What a field listener does when its event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    ClearError,
    Validate,
}

/// A listener registered on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub field: String,
    pub event: EventType,
    pub action: FieldAction,
}

/// A visible mutation the host must mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormChange {
    /// Replace the field's error node and valid/invalid markers
    Status { field: String, status: FieldStatus },
    /// Move focus to the field, optionally scrolling it into view
    Focus { field: String, scroll_into_view: bool },
    /// Write the date picker's upper bound
    DateMax { field: String, max: NaiveDate },
    /// Hide the form and reveal the success message
    Submitted,
}

/// Ordered collection of fields plus the submission phase
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<Field>,
    phase: FormPhase,
    listeners: Vec<Listener>,
    intercept_submit: bool,
    changes: Vec<FormChange>,
}

impl Form {
    /// Builds a form; field names must be unique
    pub fn new(fields: Vec<Field>) -> Result<Self, FormError> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(FormError::DuplicateField(field.name().to_string()));
            }
        }

        Ok(Self {
            fields,
            ..Self::default()
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    /// Stores a control's current value without validating it
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let index = self.index_of(name)?;
        self.fields[index].set_value(value);
        Ok(())
    }

    /// Clears the field's error while leaving any valid marker in place
    pub fn clear_error(&mut self, name: &str) -> Result<(), FormError> {
        let index = self.index_of(name)?;
        if self.fields[index].clear_error() {
            self.record_status(index);
        }
        Ok(())
    }

    /// First field currently marked invalid, in form order
    pub fn first_invalid(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.status().is_invalid())
    }

    /// Registers a field listener; registering the same one twice has no effect
    pub fn listen(&mut self, listener: Listener) -> Result<(), FormError> {
        self.index_of(&listener.field)?;
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
        Ok(())
    }

    /// Routes submit events to the validator instead of letting them through
    pub fn intercept_submit(&mut self) {
        self.intercept_submit = true;
    }

    pub fn intercepts_submit(&self) -> bool {
        self.intercept_submit
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Actions registered for `event` on `field`, in registration order
    pub fn actions_for(&self, field: &str, event: EventType) -> Vec<FieldAction> {
        self.listeners
            .iter()
            .filter(|l| l.field == field && l.event == event)
            .map(|l| l.action)
            .collect()
    }

    /// Pending visible changes, oldest first
    pub fn changes(&self) -> &[FormChange] {
        &self.changes
    }

    /// Drains the journal for the host to apply
    pub fn take_changes(&mut self) -> Vec<FormChange> {
        std::mem::take(&mut self.changes)
    }

    pub(crate) fn index_of(&self, name: &str) -> Result<usize, FormError> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub(crate) fn field_at(&self, index: usize) -> &Field {
        &self.fields[index]
    }

    pub(crate) fn apply_status(&mut self, index: usize, status: FieldStatus) {
        if self.fields[index].set_status(status) {
            self.record_status(index);
        }
    }

    pub(crate) fn apply_max(&mut self, index: usize, max: NaiveDate) {
        self.fields[index].set_max(max);
        let field = self.fields[index].name().to_string();
        self.changes.push(FormChange::DateMax { field, max });
    }

    pub(crate) fn request_focus(&mut self, field: String, scroll_into_view: bool) {
        self.changes.push(FormChange::Focus {
            field,
            scroll_into_view,
        });
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.phase = FormPhase::Submitted;
        self.changes.push(FormChange::Submitted);
    }

    fn record_status(&mut self, index: usize) {
        let field = &self.fields[index];
        self.changes.push(FormChange::Status {
            field: field.name().to_string(),
            status: field.status().clone(),
        });
    }
}
