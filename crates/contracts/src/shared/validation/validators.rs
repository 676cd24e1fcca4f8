//! Field validators
//!
//! Small pure predicates over a field value. Malformed input fails the
//! predicate, nothing here panics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-z\-0-9]+\.)+[a-z]{2,}))$"#,
    )
    .expect("email pattern is valid")
});

static GOV_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+'\-]+@gov\.bc\.ca$").expect("gov email pattern is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(\+?1[\s.\-]?)?(\(\d{3}\)|\d{3})[\s.\-]?\d{3}[\s.\-]?\d{4}(\s*(x|ext\.?)\s*\d{1,5})?$",
    )
    .expect("phone pattern is valid")
});

static POSTAL_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ABCEGHJ-NPRSTVXY]\d[ABCEGHJ-NPRSTV-Z][ \-]?\d[ABCEGHJ-NPRSTV-Z]\d$")
        .expect("postal code pattern is valid")
});

static EMPLOYEE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{6}$").expect("employee number pattern is valid"));

pub const PASSWORD_MIN_LENGTH: usize = 10;

/// Lowest and highest years-of-service milestones
pub const MILESTONE_RANGE: std::ops::RangeInclusive<u64> = 5..=50;

/// A single field predicate
#[derive(Debug, Clone, Copy)]
pub enum Validator {
    /// Non-empty after string coercion
    Required,
    Email,
    /// Email in the `gov.bc.ca` domain
    GovEmail,
    /// North-American phone number with optional extension
    Phone,
    /// Canadian postal code
    PostalCode,
    /// Exactly six digits
    EmployeeNumber,
    /// At least ten characters with upper, lower, digit and special characters
    Password,
    /// Years of service in 5..=50, multiple of five
    Milestone,
    /// Checkbox that must be ticked
    Accepted,
    /// At most `n` characters
    MaxLength(usize),
    Custom(fn(&Value) -> bool),
}

impl Validator {
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Validator::Required => !coerce(value).is_empty(),
            Validator::Email => EMAIL_RE.is_match(coerce(value).trim()),
            Validator::GovEmail => GOV_EMAIL_RE.is_match(coerce(value).trim()),
            Validator::Phone => PHONE_RE.is_match(coerce(value).trim()),
            Validator::PostalCode => POSTAL_CODE_RE.is_match(coerce(value).trim()),
            Validator::EmployeeNumber => EMPLOYEE_NUMBER_RE.is_match(coerce(value).trim()),
            Validator::Password => value.as_str().is_some_and(is_strong_password),
            Validator::Milestone => milestone_years(value)
                .is_some_and(|years| MILESTONE_RANGE.contains(&years) && years % 5 == 0),
            Validator::Accepted => matches!(value, Value::Bool(true))
                || value.as_str().is_some_and(|s| s == "true"),
            Validator::MaxLength(max) => coerce(value).chars().count() <= *max,
            Validator::Custom(predicate) => predicate(value),
        }
    }
}

/// String coercion of a JSON value, following the usual form-input rules:
/// `null` is empty, arrays join their elements with commas.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object]".to_string(),
    }
}

fn milestone_years(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}
