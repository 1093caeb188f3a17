//! Control kinds

use serde::{Deserialize, Serialize};

/// What sort of control a field is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Date,
    Select,
}

impl FieldKind {
    /// Maps an `<input type="...">` value; unknown types behave as text
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "email" => FieldKind::Email,
            "date" => FieldKind::Date,
            s if s.starts_with("select") => FieldKind::Select,
            _ => FieldKind::Text,
        }
    }

    /// Date values are taken verbatim; everything else is trimmed
    pub fn normalize<'a>(&self, raw: &'a str) -> &'a str {
        match self {
            FieldKind::Date => raw,
            _ => raw.trim(),
        }
    }
}
