//! Philippine mobile number validation

use once_cell::sync::Lazy;
use regex::Regex;

static PH_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(09|\+639)[0-9]{9}$").expect("phone pattern compiles"));

/// Strips every whitespace character, including interior ones
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validates a PH mobile number: `09` or `+639` followed by 9 digits
///
/// Whitespace anywhere in the value is ignored, so `0917 123 4567` passes.
pub fn is_phone(value: &str) -> bool {
    PH_MOBILE_REGEX.is_match(&normalize_phone(value))
}
