//! Date-of-birth arithmetic

use chrono::{Datelike, Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Format used by `<input type="date">` values and the `max` attribute
pub const ISO_DATE: &str = "%Y-%m-%d";

static ISO_DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"));

/// Parses an ISO `YYYY-MM-DD` date, taken verbatim (no trimming)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_REGEX.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE).ok()
}

/// Latest birth date that is at least `years` old on `today`
///
/// Same month and day, `years` earlier. A day that does not exist in the target
/// year rolls over into the following month, so 2024-02-29 minus 18 years is
/// 2006-03-01. Returns `None` only when the result falls outside chrono's range.
pub fn min_birth_date(today: NaiveDate, years: u32) -> Option<NaiveDate> {
    let year = today.year().checked_sub(i32::try_from(years).ok()?)?;
    let first_of_month = today.with_day(1)?.with_year(year)?;
    first_of_month.checked_add_days(Days::new(u64::from(today.day0())))
}

/// Formats a date the way the `max` attribute expects it
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}
