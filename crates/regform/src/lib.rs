// regform - registration form validator
// Headless form model driven by the regform-validation rule table

pub mod config;
pub mod field;
pub mod form;
pub mod validator;

pub use config::{DocumentConfig, SubmitConfig, ValidatorConfig};
pub use field::{Field, FieldStatus};
pub use form::{
    EventType, FieldAction, Form, FormChange, FormError, FormEvent, FormPhase, Listener,
};
pub use validator::{EventOutcome, FormValidator, SubmitOutcome, Today};

// Re-export the validation core so hosts need a single dependency
pub use regform_validation as validation;
pub use regform_validation::{FieldError, FieldKind, NamePolicy, RuleOptions, RuleSet};
