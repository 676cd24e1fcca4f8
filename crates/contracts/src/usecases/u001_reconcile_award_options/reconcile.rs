use super::input::{initial_input, item_size, AwardOptionInput, PecsfMode};
use crate::domain::a001_award::{Award, AwardOption, OptionField};
use crate::domain::a003_service::{OptionSelection, ServiceId};
use crate::domain::a004_pecsf_charity::PecsfCharityId;
use thiserror::Error;

/// Failures of reconciliation. The award fieldset rules reject these inputs
/// before a submission reaches the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("No value provided for option `{0}`")]
    MissingValue(String),

    #[error("`{value}` is not a choice of option `{option_type}`")]
    UnknownChoice { option_type: String, value: String },

    #[error("No engraving option for item size `{0}`")]
    UnknownItemSize(String),

    #[error("Engraving is for item size `{engraving}` but `{item_size}` was chosen")]
    ItemSizeMismatch { item_size: String, engraving: String },

    #[error("Engraving option `{size}` has an invalid character limit `{value}`")]
    InvalidLengthLimit { size: String, value: String },

    #[error("Engraving message has {length} characters, `{size}` allows {limit}")]
    EngravingTooLong {
        size: String,
        limit: usize,
        length: usize,
    },

    #[error("No charity selected")]
    MissingCharity,
}

/// Resolves the award fieldset input into the flat list of selections
/// persisted for service record `service`.
///
/// Input missing from `input` falls back to `prior` selections that still
/// belong to `award`; anything else in `prior` is dropped. Selections come
/// out in option-group order.
pub fn reconcile(
    award: &Award,
    service: ServiceId,
    prior: &[OptionSelection],
    input: &AwardOptionInput,
) -> Result<Vec<OptionSelection>, ReconcileError> {
    let input = input.clone().or_else(initial_input(award, prior, &[]));
    let select = |option: &AwardOption, custom_value: Option<String>, charity: Option<PecsfCharityId>| {
        OptionSelection {
            service,
            award_option: option.clone(),
            custom_value,
            pecsf_charity: charity,
        }
    };

    let mut selections = Vec::new();
    for group in award.option_groups() {
        match group.field() {
            OptionField::Fixed(option) => {
                selections.push(select(option, Some(option.value.clone()), None));
            }
            OptionField::Text(option) => {
                let value = input
                    .values
                    .get(&option.name)
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| ReconcileError::MissingValue(option.name.clone()))?;
                selections.push(select(option, Some(value.clone()), None));
            }
            OptionField::Choice(options) => {
                let value = input
                    .values
                    .get(group.option_type)
                    .ok_or_else(|| ReconcileError::MissingValue(group.option_type.to_string()))?;
                let chosen = options.iter().copied().find(|o| &o.value == value).ok_or_else(|| {
                    ReconcileError::UnknownChoice {
                        option_type: group.option_type.to_string(),
                        value: value.clone(),
                    }
                })?;
                selections.push(select(chosen, Some(chosen.value.clone()), None));
            }
            OptionField::Pecsf(slots) => {
                let pecsf = input.pecsf.as_ref().ok_or(ReconcileError::MissingCharity)?;
                if pecsf.mode == PecsfMode::Individual && pecsf.charity_1.is_none() {
                    return Err(ReconcileError::MissingCharity);
                }
                for (slot, option) in slots.iter().copied().enumerate() {
                    let charity = pecsf.charity(slot);
                    // Individual mode: only the first slot is mandatory
                    if pecsf.mode == PecsfMode::Individual && charity.is_none() {
                        continue;
                    }
                    selections.push(select(option, pecsf.local_program(slot), charity));
                }
            }
            OptionField::Engraving(options) => {
                let engraving = input
                    .engraving
                    .as_ref()
                    .ok_or_else(|| ReconcileError::MissingValue("engraving".to_string()))?;
                let size_group = award.item_size_group();
                let size = item_size(award, &input).ok_or_else(|| {
                    ReconcileError::MissingValue(
                        size_group
                            .as_ref()
                            .map_or("engraving.size", |g| g.option_type)
                            .to_string(),
                    )
                })?;
                if let Some(entered) = engraving.size.as_deref() {
                    if size_group.is_some() && entered != size {
                        return Err(ReconcileError::ItemSizeMismatch {
                            item_size: size.to_string(),
                            engraving: entered.to_string(),
                        });
                    }
                }
                let option = options
                    .iter()
                    .copied()
                    .find(|o| o.name == size)
                    .ok_or_else(|| ReconcileError::UnknownItemSize(size.to_string()))?;
                let limit = engraving_limit(option)?;
                let length = engraving.message.chars().count();
                if engraving.message.trim().is_empty() {
                    return Err(ReconcileError::MissingValue("engraving.message".to_string()));
                }
                if length > limit {
                    return Err(ReconcileError::EngravingTooLong {
                        size: size.to_string(),
                        limit,
                        length,
                    });
                }
                selections.push(select(option, Some(engraving.message.clone()), None));
            }
        }
    }

    log::debug!(
        "reconciled {} option selection(s) for award {} / service {}",
        selections.len(),
        award.id,
        service
    );
    Ok(selections)
}

/// Character limit of an engraving option, stored in its `value`
pub fn engraving_limit(option: &AwardOption) -> Result<usize, ReconcileError> {
    option
        .value
        .trim()
        .parse::<usize>()
        .map_err(|_| ReconcileError::InvalidLengthLimit {
            size: option.name.clone(),
            value: option.value.clone(),
        })
}
