//! Field validation aggregation
//!
//! A section declares a list of [`ValidationRule`]s. [`validate`] folds
//! every rule over a data object into a single completeness flag.

pub mod sections;
pub mod validators;

pub use sections::{Condition, Section, SectionSet, SectionStatus};
pub use validators::Validator;

use crate::shared::field_path::FieldPath;
use serde_json::Value;

/// A field key with the validators its value must satisfy.
/// Rules without validators only label a field.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub key: FieldPath,
    pub label: String,
    pub validators: Vec<Validator>,
}

impl ValidationRule {
    pub fn new(key: FieldPath, label: impl Into<String>, validators: Vec<Validator>) -> Self {
        Self {
            key,
            label: label.into(),
            validators,
        }
    }

    /// Builds a rule from a path literal; invalid literals are a programming error
    /// caught by the section tests.
    pub fn field(key: &str, label: impl Into<String>, validators: Vec<Validator>) -> Self {
        let key = FieldPath::parse(key)
            .unwrap_or_else(|e| panic!("invalid field path literal `{key}`: {e}"));
        Self::new(key, label, validators)
    }

    pub fn is_active(&self) -> bool {
        !self.validators.is_empty()
    }

    pub fn passes(&self, data: &Value) -> bool {
        let value = self.key.get(data).unwrap_or(&Value::Null);
        self.validators.iter().all(|v| v.check(value))
    }
}

/// `true` iff `data` is present and every rule with validators passes all of
/// them for the value at its key (`null` when the key is missing).
pub fn validate(rules: &[ValidationRule], data: Option<&Value>) -> bool {
    match data {
        None | Some(Value::Null) => false,
        Some(data) => rules
            .iter()
            .filter(|rule| rule.is_active())
            .all(|rule| rule.passes(data)),
    }
}

/// Labels of the active rules that fail for `data`
pub fn failed_rules<'a>(rules: &'a [ValidationRule], data: Option<&Value>) -> Vec<&'a str> {
    let data = match data {
        None | Some(Value::Null) => &Value::Null,
        Some(data) => data,
    };
    rules
        .iter()
        .filter(|rule| rule.is_active() && !rule.passes(data))
        .map(|rule| rule.label.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::field("first_name", "First Name", vec![Validator::Required]),
            ValidationRule::field(
                "office_email",
                "Office Email",
                vec![Validator::Required, Validator::GovEmail],
            ),
            ValidationRule::field("street2", "Street (line 2)", vec![]),
        ]
    }

    #[test]
    fn test_absent_data_fails() {
        assert!(!validate(&rules(), None));
        assert!(!validate(&rules(), Some(&Value::Null)));
        assert!(!validate(&[], None));
    }

    #[test]
    fn test_all_rules_pass() {
        let data = json!({"first_name": "Ada", "office_email": "ada@gov.bc.ca"});
        assert!(validate(&rules(), Some(&data)));
    }

    #[test]
    fn test_missing_key_resolves_to_null() {
        let data = json!({"first_name": "Ada"});
        assert!(!validate(&rules(), Some(&data)));
        assert_eq!(failed_rules(&rules(), Some(&data)), vec!["Office Email"]);
    }

    #[test]
    fn test_rules_without_validators_are_ignored() {
        let only_labels = vec![ValidationRule::field("street2", "Street", vec![])];
        assert!(validate(&only_labels, Some(&json!({}))));
    }

    #[test]
    fn test_every_validator_of_a_rule_must_pass() {
        let data = json!({"first_name": "Ada", "office_email": "ada@example.com"});
        assert!(!validate(&rules(), Some(&data)));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let data = json!({"first_name": "Ada", "office_email": "bad"});
        let rules = rules();
        let first = validate(&rules, Some(&data));
        let second = validate(&rules, Some(&data));
        assert_eq!(first, second);
        assert_eq!(data, json!({"first_name": "Ada", "office_email": "bad"}));
    }

    #[test]
    fn test_nested_keys() {
        let rules = vec![ValidationRule::field(
            "office_address.postal_code",
            "Postal Code",
            vec![Validator::Required, Validator::PostalCode],
        )];
        assert!(validate(&rules, Some(&json!({"office_address": {"postal_code": "V8V 0C5"}}))));
        assert!(!validate(&rules, Some(&json!({"office_address": {}}))));
    }
}
