//! regform validation core
//!
//! Pure predicates and the table-driven rule set behind the registration form validator.
//! Nothing here knows about documents, listeners or markers; the `regform` crate layers the
//! form model on top and the WASM crate wires it into the browser.

pub mod date;
pub mod email;
pub mod error;
pub mod kind;
pub mod phone;
pub mod rules;
pub mod string;

// Re-export all validators
pub use date::*;
pub use email::*;
pub use error::FieldError;
pub use kind::FieldKind;
pub use phone::*;
pub use rules::{fields, NamePolicy, Rule, RuleContext, RuleOptions, RuleSet, Verdict};
pub use string::*;
