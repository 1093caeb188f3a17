//! Field validation failures
//!
//! One variant per rule. The `Display` text is the inline message shown next to the control.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Enter a valid email (e.g. juan@email.com).")]
    InvalidEmail,

    #[error("Enter a valid PH mobile number (e.g. 09171234567).")]
    InvalidPhone,

    #[error("ZIP code must be 4 digits (e.g. 1100).")]
    InvalidZip,

    #[error("Enter a valid date.")]
    InvalidDate,

    #[error("You must be at least {min_age} years old.")]
    Underage { min_age: u32 },

    #[error("Name may only contain letters and spaces.")]
    InvalidName,

    #[error("Must be at least {min} characters.")]
    TooShort { min: usize },
}
