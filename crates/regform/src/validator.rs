// File: src/validator.rs
// Purpose: Field validation, live bindings and submission gating over a headless Form

use chrono::{Local, NaiveDate};
use regform_validation::{fields, min_birth_date, FieldError, RuleContext, RuleSet, Verdict};

use crate::config::ValidatorConfig;
use crate::field::{Field, FieldStatus};
use crate::form::{EventType, FieldAction, Form, FormError, FormEvent, Listener};

/// Where "today" comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Today {
    /// Local system clock, read on every check
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Today {
    pub fn resolve(&self) -> NaiveDate {
        match self {
            Today::System => Local::now().date_naive(),
            Today::Fixed(date) => *date,
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every required field passed; the form is (or already was) submitted
    Submitted,
    /// At least one required field failed
    Blocked {
        /// Field that received focus
        first_invalid: Option<String>,
        /// Failures among the required fields, in form order
        errors: Vec<(String, FieldError)>,
    },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// What handling an event amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// No listener was registered for the event
    Unhandled,
    /// Listeners ran without validating (error cleared)
    Handled,
    /// A validate listener ran; carries whether the field passed
    Validated(bool),
    Submit(SubmitOutcome),
}

/// Validates registration form fields and gates submission
#[derive(Debug, Clone)]
pub struct FormValidator {
    rules: RuleSet,
    min_age: u32,
    scroll_into_view: bool,
    today: Today,
}

impl FormValidator {
    /// Canonical registration rules tuned by `config`
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            rules: RuleSet::registration(&config.rules),
            min_age: config.rules.min_age,
            scroll_into_view: config.submit.scroll_into_view,
            today: Today::System,
        }
    }

    /// Swaps in a custom rule table
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Pins the date used for age checks
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Today::Fixed(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.resolve()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Runs the rule table against the field's current value without touching it
    pub fn evaluate(&self, field: &Field) -> Verdict {
        let ctx = RuleContext {
            today: self.today(),
            required: field.is_required(),
        };
        self.rules
            .evaluate(field.name(), field.kind(), field.value(), &ctx)
    }

    /// Recomputes and applies one field's status; returns whether it passed
    ///
    /// Optional empty fields pass and end up with neither marker.
    pub fn validate_field(&self, field: &mut Field) -> bool {
        let verdict = self.evaluate(field);
        let passed = verdict.is_pass();
        field.set_status(verdict.into());
        passed
    }

    /// Like [`validate_field`](Self::validate_field) for a field of `form`, journaling the change
    pub fn validate(&self, form: &mut Form, name: &str) -> Result<bool, FormError> {
        let index = form.index_of(name)?;
        Ok(self.validate_at(form, index))
    }

    fn validate_at(&self, form: &mut Form, index: usize) -> bool {
        let verdict = self.evaluate(form.field_at(index));
        let passed = verdict.is_pass();
        tracing::debug!(
            field = form.field_at(index).name(),
            ?verdict,
            "field validated"
        );
        form.apply_status(index, verdict.into());
        passed
    }

    /// Intercepted submission
    ///
    /// Re-validates every required field. On failure the first invalid field is
    /// focused and the form stays in place; otherwise the form moves to
    /// `Submitted`, which cannot be undone.
    pub fn handle_submit(&self, form: &mut Form) -> SubmitOutcome {
        if form.is_submitted() {
            return SubmitOutcome::Submitted;
        }

        let required: Vec<usize> = form
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_required())
            .map(|(i, _)| i)
            .collect();

        let mut errors = Vec::new();
        for index in required {
            if !self.validate_at(form, index) {
                let field = form.field_at(index);
                if let FieldStatus::Invalid(err) = field.status() {
                    errors.push((field.name().to_string(), err.clone()));
                }
            }
        }

        if !errors.is_empty() {
            let first_invalid = form.first_invalid().map(|f| f.name().to_string());
            if let Some(name) = &first_invalid {
                form.request_focus(name.clone(), self.scroll_into_view);
            }
            tracing::warn!(
                failed = errors.len(),
                first_invalid = first_invalid.as_deref(),
                "submission blocked"
            );
            return SubmitOutcome::Blocked {
                first_invalid,
                errors,
            };
        }

        form.mark_submitted();
        tracing::info!(fields = form.fields().len(), "registration form submitted");
        SubmitOutcome::Submitted
    }

    /// Registers live listeners on every field
    ///
    /// `input` clears the error without re-validating; `change` and `blur` run full validation.
    pub fn bind_live_validation(&self, form: &mut Form) {
        let names: Vec<String> = form.fields().iter().map(|f| f.name().to_string()).collect();
        for field in names {
            for (event, action) in [
                (EventType::Input, FieldAction::ClearError),
                (EventType::Change, FieldAction::Validate),
                (EventType::Blur, FieldAction::Validate),
            ] {
                // names come from the form itself
                let _ = form.listen(Listener {
                    field: field.clone(),
                    event,
                    action,
                });
            }
        }
    }

    /// Sets the `dob` field's upper bound to today minus the minimum age
    ///
    /// Advisory only; the age rule stays authoritative. Returns the bound, or
    /// `None` when the form has no `dob` field.
    pub fn configure_dob_max_bound(&self, form: &mut Form) -> Option<NaiveDate> {
        let index = form.index_of(fields::DOB).ok()?;
        let max = min_birth_date(self.today(), self.min_age)?;
        form.apply_max(index, max);
        Some(max)
    }

    /// Full initialization: date bound, live listeners and submit interception
    pub fn attach(&self, form: &mut Form) {
        self.configure_dob_max_bound(form);
        self.bind_live_validation(form);
        form.intercept_submit();
        tracing::debug!(fields = form.fields().len(), "validator attached");
    }

    /// Delivers a host event
    ///
    /// `input` and `change` store the carried value first, then whatever listeners
    /// are registered for the field run in order.
    pub fn dispatch(&self, form: &mut Form, event: FormEvent) -> Result<EventOutcome, FormError> {
        let event_type = event.event_type();
        let field = match event {
            FormEvent::Submit => {
                if !form.intercepts_submit() {
                    return Ok(EventOutcome::Unhandled);
                }
                return Ok(EventOutcome::Submit(self.handle_submit(form)));
            }
            FormEvent::Input { field, value } | FormEvent::Change { field, value } => {
                form.set_value(&field, value)?;
                field
            }
            FormEvent::Blur { field } => {
                form.index_of(&field)?;
                field
            }
        };

        let mut outcome = EventOutcome::Unhandled;
        for action in form.actions_for(&field, event_type) {
            match action {
                FieldAction::ClearError => {
                    form.clear_error(&field)?;
                    if outcome == EventOutcome::Unhandled {
                        outcome = EventOutcome::Handled;
                    }
                }
                FieldAction::Validate => {
                    outcome = EventOutcome::Validated(self.validate(form, &field)?);
                }
            }
        }
        Ok(outcome)
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}
