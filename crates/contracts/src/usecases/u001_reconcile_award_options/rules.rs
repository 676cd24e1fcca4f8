//! Field rules of the award fieldset
//!
//! Built per award (and per chosen engraving size) so incomplete option
//! input blocks submission before reconciliation runs.

use super::input::{item_size, AwardOptionInput};
use super::reconcile::engraving_limit;
use crate::domain::a001_award::{Award, AwardOption, OptionField, OptionKind};
use crate::shared::field_path::FieldPath;
use crate::shared::validation::{ValidationRule, Validator};
use serde_json::Value;

fn rule(prefix: &FieldPath, tail: &[&str], label: &str, validators: Vec<Validator>) -> Option<ValidationRule> {
    let segments = prefix
        .segments()
        .iter()
        .map(String::as_str)
        .chain(tail.iter().copied());
    match FieldPath::from_segments(segments) {
        Ok(key) => Some(ValidationRule::new(key, label, validators)),
        Err(e) => {
            log::warn!("skipping award option rule `{}`: {}", label, e);
            None
        }
    }
}

fn label_of(option: &AwardOption) -> &str {
    if option.label.is_empty() {
        &option.name
    } else {
        &option.label
    }
}

/// Individual-charity mode requires the first charity
fn pecsf_complete(value: &Value) -> bool {
    match value.get("mode").and_then(Value::as_str) {
        Some("pool") => true,
        Some("individual") => value
            .get("charity_1")
            .is_some_and(|c| c.as_str().is_some_and(|s| !s.is_empty())),
        _ => false,
    }
}

/// Engraving rules for the chosen item `size`: the size is required, and
/// once it names a known option the message is required and limited to that
/// option's character count. When the award has an item-size option group,
/// that group's own rule requires the size.
pub fn engraving_rules(award: &Award, size: Option<&str>, prefix: &FieldPath) -> Vec<ValidationRule> {
    let mut rules: Vec<ValidationRule> = Vec::new();
    if award.item_size_group().is_none() {
        rules.extend(rule(prefix, &["engraving", "size"], "Engraving Size", vec![Validator::Required]));
    }

    let chosen = size.and_then(|size| {
        award
            .options
            .iter()
            .find(|o| o.kind() == OptionKind::Engraving && o.name == size)
    });
    if let Some(option) = chosen {
        let mut validators = vec![Validator::Required];
        match engraving_limit(option) {
            Ok(limit) => validators.push(Validator::MaxLength(limit)),
            Err(e) => log::warn!("{}", e),
        }
        rules.extend(rule(prefix, &["engraving", "message"], "Engraving Message", validators));
    } else if size.is_some() {
        rules.extend(rule(prefix, &["engraving", "size"], "Engraving Size", vec![Validator::Custom(|_| false)]));
    }
    rules
}

/// Rules for every option group of `award`, keyed under `prefix` (the path
/// of the [`AwardOptionInput`] inside the validated object).
pub fn award_input_rules(award: &Award, input: &AwardOptionInput, prefix: &FieldPath) -> Vec<ValidationRule> {
    let mut rules = Vec::new();
    for group in award.option_groups() {
        match group.field() {
            OptionField::Fixed(_) => {}
            OptionField::Text(option) => {
                rules.extend(rule(
                    prefix,
                    &["values", option.name.as_str()],
                    label_of(option),
                    vec![Validator::Required],
                ));
            }
            OptionField::Choice(_) => {
                rules.extend(rule(
                    prefix,
                    &["values", group.option_type],
                    group.option_type,
                    vec![Validator::Required],
                ));
            }
            OptionField::Pecsf(_) => {
                rules.extend(rule(
                    prefix,
                    &["pecsf"],
                    "PECSF Charity",
                    vec![Validator::Required, Validator::Custom(pecsf_complete)],
                ));
            }
            OptionField::Engraving(_) => {
                let size = item_size(award, input);
                rules.extend(engraving_rules(award, size, prefix));
                // a size entered with the engraving must agree with the item size
                let entered = input.engraving_size();
                if award.item_size_group().is_some() && entered.is_some() && entered != size {
                    rules.extend(rule(
                        prefix,
                        &["engraving", "size"],
                        "Engraving Size",
                        vec![Validator::Custom(|_| false)],
                    ));
                }
            }
        }
    }
    rules
}
