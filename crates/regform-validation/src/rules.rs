//! Table-driven validation rules
//!
//! A [`RuleSet`] maps control kinds and field names to ordered lists of [`Rule`]s.
//! Evaluation is first-failure-wins: emptiness is settled first, then kind rules,
//! then the rules registered for the field's name.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{min_birth_date, parse_date};
use crate::email::is_email;
use crate::error::FieldError;
use crate::kind::FieldKind;
use crate::phone::is_phone;
use crate::string::{is_name, is_text, is_zip};

/// Control names used by the registration form
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const MIDDLE_NAME: &str = "middleName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const DOB: &str = "dob";
    pub const ZIP_CODE: &str = "zipCode";
    pub const BARANGAY: &str = "barangay";
    pub const CITY: &str = "city";
    pub const PROVINCE: &str = "province";
    pub const STREET: &str = "street";

    pub const ADDRESS: [&str; 4] = [BARANGAY, CITY, PROVINCE, STREET];
}

/// How personal names are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamePolicy {
    /// First and last name only need the minimum length; any characters allowed
    LengthOnly,
    /// First, middle and last name must be letters and spaces; the minimum
    /// length applies only to required name fields
    #[default]
    LettersAndSpaces,
}

/// Tunables for the registration rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOptions {
    #[serde(default)]
    pub name_policy: NamePolicy,

    #[serde(default = "default_min_age")]
    pub min_age: u32,

    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
}

fn default_min_age() -> u32 {
    18
}

fn default_min_text_length() -> usize {
    2
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::default(),
            min_age: default_min_age(),
            min_text_length: default_min_text_length(),
        }
    }
}

/// Facts a rule may need besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    pub today: NaiveDate,
    pub required: bool,
}

/// A single predicate paired with the error it raises
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Email,
    Phone,
    Zip,
    /// Parsed as an ISO date and compared against today minus the given years
    MinAge(u32),
    NameChars,
    MinLength { min: usize, required_only: bool },
}

impl Rule {
    /// Runs the predicate against an already normalized, non-empty value
    pub fn check(&self, value: &str, ctx: &RuleContext) -> Result<(), FieldError> {
        match self {
            Rule::Email => ensure(is_email(value), FieldError::InvalidEmail),
            Rule::Phone => ensure(is_phone(value), FieldError::InvalidPhone),
            Rule::Zip => ensure(is_zip(value), FieldError::InvalidZip),
            Rule::MinAge(years) => {
                let dob = parse_date(value).ok_or(FieldError::InvalidDate)?;
                let bound = min_birth_date(ctx.today, *years).ok_or(FieldError::InvalidDate)?;
                ensure(dob <= bound, FieldError::Underage { min_age: *years })
            }
            Rule::NameChars => ensure(is_name(value), FieldError::InvalidName),
            Rule::MinLength { min, required_only } => {
                if *required_only && !ctx.required {
                    return Ok(());
                }
                ensure(is_text(value, *min), FieldError::TooShort { min: *min })
            }
        }
    }
}

fn ensure(ok: bool, err: FieldError) -> Result<(), FieldError> {
    if ok {
        Ok(())
    } else {
        Err(err)
    }
}

/// Outcome of evaluating one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Optional and empty: neither valid nor invalid
    Skipped,
    Passed,
    Failed(FieldError),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        !matches!(self, Verdict::Failed(_))
    }
}

/// Rules keyed by control kind and by field name
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    by_kind: HashMap<FieldKind, Vec<Rule>>,
    by_name: HashMap<String, Vec<Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule applied to every field of `kind`
    pub fn kind_rule(mut self, kind: FieldKind, rule: Rule) -> Self {
        self.by_kind.entry(kind).or_default().push(rule);
        self
    }

    /// Appends a rule applied to the field called `name`
    pub fn field_rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.by_name.entry(name.into()).or_default().push(rule);
        self
    }

    /// The canonical registration form table
    pub fn registration(options: &RuleOptions) -> Self {
        let text_min = Rule::MinLength {
            min: options.min_text_length,
            required_only: false,
        };

        let mut set = RuleSet::new()
            .kind_rule(FieldKind::Email, Rule::Email)
            .field_rule(fields::PHONE, Rule::Phone)
            .field_rule(fields::ZIP_CODE, Rule::Zip)
            .field_rule(fields::DOB, Rule::MinAge(options.min_age));

        set = match options.name_policy {
            NamePolicy::LengthOnly => [fields::LAST_NAME, fields::FIRST_NAME]
                .into_iter()
                .fold(set, |set, name| set.field_rule(name, text_min.clone())),
            NamePolicy::LettersAndSpaces => {
                let required_min = Rule::MinLength {
                    min: options.min_text_length,
                    required_only: true,
                };
                [fields::FIRST_NAME, fields::LAST_NAME, fields::MIDDLE_NAME]
                    .into_iter()
                    .fold(set, |set, name| {
                        set.field_rule(name, Rule::NameChars)
                            .field_rule(name, required_min.clone())
                    })
            }
        };

        fields::ADDRESS
            .into_iter()
            .fold(set, |set, name| set.field_rule(name, text_min.clone()))
    }

    /// Kind rules first, then name rules, each in registration order
    pub fn rules_for<'a>(&'a self, kind: FieldKind, name: &str) -> impl Iterator<Item = &'a Rule> {
        let kind_rules = self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or_default();
        let name_rules = self.by_name.get(name).map(Vec::as_slice).unwrap_or_default();
        kind_rules.iter().chain(name_rules.iter())
    }

    /// Evaluates a raw control value
    ///
    /// The value is trimmed unless `kind` is a date. An empty value is skipped when
    /// optional and fails with [`FieldError::Required`] otherwise.
    pub fn evaluate(&self, name: &str, kind: FieldKind, raw: &str, ctx: &RuleContext) -> Verdict {
        let value = kind.normalize(raw);

        if value.is_empty() {
            return if ctx.required {
                Verdict::Failed(FieldError::Required)
            } else {
                Verdict::Skipped
            };
        }

        match self
            .rules_for(kind, name)
            .try_for_each(|rule| rule.check(value, ctx))
        {
            Ok(()) => Verdict::Passed,
            Err(err) => Verdict::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ctx(required: bool) -> RuleContext {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            required,
        }
    }

    fn canonical() -> RuleSet {
        RuleSet::registration(&RuleOptions::default())
    }

    fn lenient() -> RuleSet {
        RuleSet::registration(&RuleOptions {
            name_policy: NamePolicy::LengthOnly,
            ..RuleOptions::default()
        })
    }

    #[test]
    fn test_optional_empty_is_skipped() {
        let rules = canonical();
        assert_eq!(rules.evaluate("email", FieldKind::Email, "   ", &ctx(false)), Verdict::Skipped);
        assert_eq!(rules.evaluate("anything", FieldKind::Text, "", &ctx(false)), Verdict::Skipped);
        assert!(Verdict::Skipped.is_pass());
    }

    #[rstest]
    #[case("firstName", FieldKind::Text)]
    #[case("email", FieldKind::Email)]
    #[case("dob", FieldKind::Date)]
    #[case("province", FieldKind::Select)]
    fn test_required_empty_fails(#[case] name: &str, #[case] kind: FieldKind) {
        assert_eq!(
            canonical().evaluate(name, kind, "", &ctx(true)),
            Verdict::Failed(FieldError::Required)
        );
    }

    #[rstest]
    #[case("email", FieldKind::Email, "juan@", FieldError::InvalidEmail)]
    #[case("phone", FieldKind::Text, "08171234567", FieldError::InvalidPhone)]
    #[case("zipCode", FieldKind::Text, "110", FieldError::InvalidZip)]
    #[case("dob", FieldKind::Date, "2006-06-16", FieldError::Underage { min_age: 18 })]
    #[case("dob", FieldKind::Date, "16/06/2006", FieldError::InvalidDate)]
    #[case("city", FieldKind::Text, "Q", FieldError::TooShort { min: 2 })]
    #[case("firstName", FieldKind::Text, "Juan3", FieldError::InvalidName)]
    #[case("lastName", FieldKind::Text, "J", FieldError::TooShort { min: 2 })]
    fn test_rule_failures(
        #[case] name: &str,
        #[case] kind: FieldKind,
        #[case] value: &str,
        #[case] expected: FieldError,
    ) {
        assert_eq!(
            canonical().evaluate(name, kind, value, &ctx(true)),
            Verdict::Failed(expected)
        );
    }

    #[rstest]
    #[case("email", FieldKind::Email, " juan@email.com ")]
    #[case("phone", FieldKind::Text, "0917 123 4567")]
    #[case("zipCode", FieldKind::Text, "1100")]
    #[case("dob", FieldKind::Date, "2006-06-15")]
    #[case("street", FieldKind::Text, "Rizal Ave")]
    #[case("firstName", FieldKind::Text, "Niño")]
    #[case("lastName", FieldKind::Text, "Nin\u{303}o")]
    #[case("nickname", FieldKind::Text, "x")]
    fn test_rule_passes(#[case] name: &str, #[case] kind: FieldKind, #[case] value: &str) {
        assert_eq!(canonical().evaluate(name, kind, value, &ctx(true)), Verdict::Passed);
    }

    #[test]
    fn test_date_is_not_trimmed() {
        assert_eq!(
            canonical().evaluate("dob", FieldKind::Date, " 2000-01-01", &ctx(true)),
            Verdict::Failed(FieldError::InvalidDate)
        );
    }

    #[test]
    fn test_letters_policy_length_only_when_required() {
        let rules = canonical();
        assert_eq!(rules.evaluate("middleName", FieldKind::Text, "R", &ctx(false)), Verdict::Passed);
        assert_eq!(
            rules.evaluate("middleName", FieldKind::Text, "R", &ctx(true)),
            Verdict::Failed(FieldError::TooShort { min: 2 })
        );
        assert_eq!(
            rules.evaluate("middleName", FieldKind::Text, "R.", &ctx(false)),
            Verdict::Failed(FieldError::InvalidName)
        );
    }

    #[test]
    fn test_length_only_policy_allows_symbols() {
        let rules = lenient();
        assert_eq!(rules.evaluate("firstName", FieldKind::Text, "J4n", &ctx(true)), Verdict::Passed);
        assert_eq!(
            rules.evaluate("firstName", FieldKind::Text, "J", &ctx(false)),
            Verdict::Failed(FieldError::TooShort { min: 2 })
        );
        // middle name carries no rule under this policy
        assert_eq!(rules.evaluate("middleName", FieldKind::Text, "R.", &ctx(true)), Verdict::Passed);
    }

    #[test]
    fn test_kind_rules_run_before_name_rules() {
        let rules = RuleSet::new()
            .kind_rule(FieldKind::Email, Rule::Email)
            .field_rule("email", Rule::MinLength { min: 50, required_only: false });
        assert_eq!(
            rules.evaluate("email", FieldKind::Email, "nope", &ctx(true)),
            Verdict::Failed(FieldError::InvalidEmail)
        );
        assert_eq!(
            rules.evaluate("email", FieldKind::Email, "a@b.co", &ctx(true)),
            Verdict::Failed(FieldError::TooShort { min: 50 })
        );
    }

    #[test]
    fn test_configured_minimums() {
        let rules = RuleSet::registration(&RuleOptions {
            min_age: 21,
            min_text_length: 3,
            ..RuleOptions::default()
        });
        assert_eq!(
            rules.evaluate("dob", FieldKind::Date, "2004-01-01", &ctx(true)),
            Verdict::Failed(FieldError::Underage { min_age: 21 })
        );
        assert_eq!(
            rules.evaluate("city", FieldKind::Text, "QC", &ctx(true)),
            Verdict::Failed(FieldError::TooShort { min: 3 })
        );
    }
}
