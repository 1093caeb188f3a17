//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld, no whitespace and a single '@'
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validates email shape
///
/// Accepts `local@domain.tld` where neither side of the `@` contains whitespace
/// and the domain has at least one `.` followed by something.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}
