//! Section validators
//!
//! A [`Section`] is one independently validated slice of a multi-part form.
//! A [`SectionSet`] composes sections into the "ready to confirm" predicate.

use super::{failed_rules, validate, ValidationRule};
use crate::shared::field_path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Applicability of a section, decided by one field of the whole record
#[derive(Debug, Clone)]
pub enum Condition {
    When { path: FieldPath, equals: Value },
    Unless { path: FieldPath, equals: Value },
}

impl Condition {
    pub fn applies(&self, record: &Value) -> bool {
        match self {
            Condition::When { path, equals } => path.get(record) == Some(equals),
            Condition::Unless { path, equals } => path.get(record) != Some(equals),
        }
    }

    fn path(&self) -> &FieldPath {
        match self {
            Condition::When { path, .. } | Condition::Unless { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Complete,
    Required,
    /// Section skipped by its condition
    NotApplicable,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    /// Rules are evaluated against the sub-object at this path
    pub scope: Option<FieldPath>,
    pub rules: Vec<ValidationRule>,
    pub condition: Option<Condition>,
}

impl Section {
    pub fn new(name: impl Into<String>, rules: Vec<ValidationRule>) -> Self {
        Self {
            name: name.into(),
            scope: None,
            rules,
            condition: None,
        }
    }

    pub fn scoped(name: impl Into<String>, scope: FieldPath, rules: Vec<ValidationRule>) -> Self {
        Self {
            scope: Some(scope),
            ..Self::new(name, rules)
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn applies(&self, record: &Value) -> bool {
        self.condition.as_ref().map_or(true, |c| c.applies(record))
    }

    pub fn scoped_data<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match &self.scope {
            Some(scope) => scope.get(record),
            None => Some(record),
        }
    }

    /// Sections skipped by their condition count as complete
    pub fn validate(&self, record: &Value) -> bool {
        !self.applies(record) || validate(&self.rules, self.scoped_data(record))
    }

    pub fn status(&self, record: &Value) -> SectionStatus {
        if !self.applies(record) {
            SectionStatus::NotApplicable
        } else if validate(&self.rules, self.scoped_data(record)) {
            SectionStatus::Complete
        } else {
            SectionStatus::Required
        }
    }

    pub fn failed_rules(&self, record: &Value) -> Vec<&str> {
        if !self.applies(record) {
            return Vec::new();
        }
        failed_rules(&self.rules, self.scoped_data(record))
    }

    /// Hash of everything the section's result depends on: the condition
    /// field and the value at every rule key.
    pub fn fingerprint(&self, record: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        if let Some(condition) = &self.condition {
            hash_value(condition.path().get(record), &mut hasher);
        }
        let data = self.scoped_data(record);
        scope_kind(data).hash(&mut hasher);
        for rule in self.rules.iter().filter(|r| r.is_active()) {
            hash_value(data.and_then(|d| rule.key.get(d)), &mut hasher);
        }
        hasher.finish()
    }
}

/// `validate` treats a missing or `null` scope as absent data, so the
/// kind of the scope value is part of the fingerprint.
fn scope_kind(data: Option<&Value>) -> u8 {
    match data {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Object(_)) => 2,
        Some(_) => 3,
    }
}

fn hash_value(value: Option<&Value>, hasher: &mut DefaultHasher) {
    match value {
        Some(value) => value.to_string().hash(hasher),
        None => "<absent>".hash(hasher),
    }
}

/// Ordered sections of one form
#[derive(Debug, Clone, Default)]
pub struct SectionSet {
    sections: Vec<Section>,
    confirmation: Option<String>,
}

impl SectionSet {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            confirmation: None,
        }
    }

    /// Names the section excluded from the ready-to-confirm predicate
    pub fn with_confirmation(mut self, name: impl Into<String>) -> Self {
        self.confirmation = Some(name.into());
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn is_confirmation(&self, name: &str) -> bool {
        self.confirmation.as_deref() == Some(name)
    }

    pub fn validate_section(&self, name: &str, record: &Value) -> Option<bool> {
        self.get(name).map(|s| s.validate(record))
    }

    /// AND over every section except the confirmation section
    pub fn is_ready(&self, record: &Value) -> bool {
        self.sections
            .iter()
            .filter(|s| !self.is_confirmation(&s.name))
            .all(|s| s.validate(record))
    }

    pub fn status(&self, record: &Value) -> Vec<(String, SectionStatus)> {
        self.sections
            .iter()
            .map(|s| (s.name.clone(), s.status(record)))
            .collect()
    }
}
