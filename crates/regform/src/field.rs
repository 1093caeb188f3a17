// File: src/field.rs
// Purpose: A single form control and its validation status

use chrono::NaiveDate;
use regform_validation::{FieldError, FieldKind, Verdict};

/// Last computed validation outcome of a field
///
/// The error travels with the invalid state, so a field shows a message
/// exactly when it is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Never validated, optional and empty, or error cleared while typing
    #[default]
    Unset,
    Valid,
    Invalid(FieldError),
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldStatus::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldStatus::Invalid(_))
    }

    pub fn error(&self) -> Option<&FieldError> {
        match self {
            FieldStatus::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// Presentation class carried by the control, if any
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            FieldStatus::Unset => None,
            FieldStatus::Valid => Some("valid"),
            FieldStatus::Invalid(_) => Some("invalid"),
        }
    }
}

impl From<Verdict> for FieldStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Skipped => FieldStatus::Unset,
            Verdict::Passed => FieldStatus::Valid,
            Verdict::Failed(err) => FieldStatus::Invalid(err),
        }
    }
}

/// A named input or select control
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    required: bool,
    value: String,
    status: FieldStatus,
    max: Option<NaiveDate>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            value: String::new(),
            status: FieldStatus::Unset,
            max: None,
        }
    }

    /// Marks the field as carrying the `required` attribute
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn status(&self) -> &FieldStatus {
        &self.status
    }

    /// Inline message currently displayed for this field
    pub fn error_message(&self) -> Option<String> {
        self.status.error().map(ToString::to_string)
    }

    /// Upper bound advertised to date pickers
    pub fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    pub(crate) fn set_max(&mut self, max: NaiveDate) {
        self.max = Some(max);
    }

    /// Replaces the status, reporting whether anything visible changed
    pub(crate) fn set_status(&mut self, status: FieldStatus) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        true
    }

    /// Drops the error and invalid marker; a valid marker stays until the next recompute
    pub(crate) fn clear_error(&mut self) -> bool {
        if self.status.is_invalid() {
            self.status = FieldStatus::Unset;
            true
        } else {
            false
        }
    }
}
