use crate::domain::a001_award::{Award, AwardOptionId, OptionField};
use crate::domain::a003_service::OptionSelection;
use crate::domain::a004_pecsf_charity::{PecsfCharity, PecsfCharityId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Option choices entered on the award fieldset.
///
/// `values` is keyed by option name for single customizable options and by
/// option type for choice groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardOptionInput {
    pub values: BTreeMap<String, String>,
    pub pecsf: Option<PecsfInput>,
    pub engraving: Option<EngravingInput>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PecsfMode {
    /// Donation to a regional pooled fund; every slot mirrors slot 1
    #[default]
    Pool,
    /// Up to two individual charities with optional local program text
    Individual,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PecsfInput {
    pub mode: PecsfMode,
    pub charity_1: Option<PecsfCharityId>,
    pub charity_2: Option<PecsfCharityId>,
    pub local_program_1: Option<String>,
    pub local_program_2: Option<String>,
}

impl PecsfInput {
    /// Charity of a zero-based donation slot
    pub fn charity(&self, slot: usize) -> Option<PecsfCharityId> {
        match (self.mode, slot) {
            (PecsfMode::Pool, _) => self.charity_1,
            (PecsfMode::Individual, 0) => self.charity_1,
            (PecsfMode::Individual, 1) => self.charity_2,
            _ => None,
        }
    }

    /// Local program text of a zero-based slot; pooled donations carry none
    pub fn local_program(&self, slot: usize) -> Option<String> {
        let text = match (self.mode, slot) {
            (PecsfMode::Pool, _) => None,
            (PecsfMode::Individual, 0) => self.local_program_1.as_deref(),
            (PecsfMode::Individual, 1) => self.local_program_2.as_deref(),
            _ => None,
        };
        text.map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn set_slot(&mut self, slot: usize, charity: Option<PecsfCharityId>, program: Option<String>) {
        match slot {
            0 => {
                self.charity_1 = charity;
                self.local_program_1 = program;
            }
            1 => {
                self.charity_2 = charity;
                self.local_program_2 = program;
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngravingInput {
    /// Chosen item size; matches the `name` of one engraving option
    pub size: Option<String>,
    pub message: String,
}

impl AwardOptionInput {
    /// Fills every entry missing here from `fallback`
    pub fn or_else(mut self, fallback: AwardOptionInput) -> AwardOptionInput {
        for (key, value) in fallback.values {
            self.values.entry(key).or_insert(value);
        }
        if self.pecsf.is_none() {
            self.pecsf = fallback.pecsf;
        }
        if self.engraving.is_none() {
            self.engraving = fallback.engraving;
        }
        self
    }

    pub fn engraving_size(&self) -> Option<&str> {
        self.engraving.as_ref().and_then(|e| e.size.as_deref())
    }
}

/// Item size the engraving is made for. When `award` offers an item-size
/// option group the size is the name of the option chosen there; otherwise
/// it is the size entered with the engraving.
pub fn item_size<'a>(award: &'a Award, input: &'a AwardOptionInput) -> Option<&'a str> {
    let Some(group) = award.item_size_group() else {
        return input.engraving_size();
    };
    match group.field() {
        OptionField::Choice(options) => {
            let chosen = input.values.get(group.option_type)?;
            options
                .into_iter()
                .find(|o| &o.value == chosen)
                .map(|o| o.name.as_str())
        }
        _ => group.options.first().map(|o| o.name.as_str()),
    }
}

/// Rebuilds the fieldset input from stored selections. Selections that do
/// not belong to `award` are dropped.
///
/// Donation slots that all name the same pooled fund (or no charity) come
/// back in pool mode; `charities` tells pooled funds from individual ones.
pub fn initial_input(award: &Award, prior: &[OptionSelection], charities: &[PecsfCharity]) -> AwardOptionInput {
    let mut input = AwardOptionInput::default();
    let applicable: Vec<&OptionSelection> = prior
        .iter()
        .filter(|s| award.has_option(&s.award_option))
        .collect();
    if applicable.len() < prior.len() {
        log::debug!(
            "dropping {} stale option selection(s) not offered by award {}",
            prior.len() - applicable.len(),
            award.id
        );
    }

    for group in award.option_groups() {
        let in_group = |option_id: AwardOptionId| {
            applicable
                .iter()
                .copied()
                .find(|s| s.award_option.id == option_id)
        };
        match group.field() {
            OptionField::Fixed(_) => {}
            OptionField::Text(option) => {
                if let Some(value) = in_group(option.id).and_then(|s| s.custom_value.clone()) {
                    input.values.insert(option.name.clone(), value);
                }
            }
            OptionField::Choice(options) => {
                if let Some(chosen) = options.iter().find(|o| in_group(o.id).is_some()) {
                    input
                        .values
                        .insert(group.option_type.to_string(), chosen.value.clone());
                }
            }
            OptionField::Pecsf(slots) => {
                let chosen: Vec<(usize, &OptionSelection)> = slots
                    .iter()
                    .enumerate()
                    .filter_map(|(slot, o)| in_group(o.id).map(|s| (slot, s)))
                    .collect();
                if chosen.is_empty() {
                    continue;
                }
                let mut pecsf = PecsfInput::default();
                for (slot, selection) in &chosen {
                    pecsf.set_slot(*slot, selection.pecsf_charity, selection.custom_value.clone());
                }
                let mirrored = chosen.len() == slots.len()
                    && chosen
                        .iter()
                        .all(|(_, s)| s.custom_value.is_none() && s.pecsf_charity == pecsf.charity_1);
                let pooled = match pecsf.charity_1 {
                    None => true,
                    Some(id) => charities.iter().any(|c| c.id == id && c.pooled),
                };
                pecsf.mode = if mirrored && pooled {
                    PecsfMode::Pool
                } else {
                    PecsfMode::Individual
                };
                if pecsf.mode == PecsfMode::Pool {
                    pecsf.charity_2 = None;
                }
                input.pecsf = Some(pecsf);
            }
            OptionField::Engraving(options) => {
                if let Some(selection) = options.iter().find_map(|o| in_group(o.id)) {
                    input.engraving = Some(EngravingInput {
                        size: Some(selection.award_option.name.clone()),
                        message: selection.custom_value.clone().unwrap_or_default(),
                    });
                }
            }
        }
    }
    input
}
