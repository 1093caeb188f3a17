//! String validation functions

use once_cell::sync::Lazy;
use regex::Regex;

static ZIP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("zip pattern compiles"));

// Letters from any script plus whitespace, so "Niño" and "Dela Cruz" both pass
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{M}\s]+$").expect("name pattern compiles"));

/// Validates a 4-digit PH ZIP code (surrounding whitespace ignored)
pub fn is_zip(value: &str) -> bool {
    ZIP_REGEX.is_match(value.trim())
}

/// Checks that the trimmed value has at least `min` characters
pub fn is_text(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Checks that a personal name holds only letters and spaces
///
/// Combining marks are accepted so decomposed spellings (`n` + U+0303) match
/// their precomposed forms.
pub fn is_name(value: &str) -> bool {
    NAME_REGEX.is_match(value)
}
