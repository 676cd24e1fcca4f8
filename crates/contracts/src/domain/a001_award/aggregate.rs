use serde::{Deserialize, Serialize};

// ============================================================================
// ID Types
// ============================================================================

crate::uuid_id!(
    /// Unique award identifier
    AwardId
);

crate::uuid_id!(
    /// Unique award option identifier
    AwardOptionId
);

/// Option type of the charitable-donation split
pub const PECSF_CHARITY_TYPE: &str = "pecsf-charity";

/// Option type of the engraved-message option, one option per item size
pub const ENGRAVING_TYPE: &str = "engraving";

// ============================================================================
// Aggregate
// ============================================================================

/// An award a recipient can choose for a milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub id: AwardId,
    pub short_code: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Milestone (years of service) the award is offered for
    pub milestone: u32,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub options: Vec<AwardOption>,
}

fn default_active() -> bool {
    true
}

/// One configurable option of an award
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardOption {
    pub id: AwardOptionId,
    pub award: AwardId,
    #[serde(rename = "type")]
    pub option_type: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub customizable: bool,
}

impl AwardOption {
    pub fn kind(&self) -> OptionKind {
        OptionKind::of(&self.option_type)
    }
}

/// Classification of an option type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    General,
    PecsfCharity,
    Engraving,
}

impl OptionKind {
    pub fn of(option_type: &str) -> Self {
        match option_type {
            PECSF_CHARITY_TYPE => OptionKind::PecsfCharity,
            ENGRAVING_TYPE => OptionKind::Engraving,
            _ => OptionKind::General,
        }
    }
}

impl Award {
    /// Options grouped by type, in order of first appearance
    pub fn option_groups(&self) -> Vec<OptionGroup<'_>> {
        let mut groups: Vec<OptionGroup<'_>> = Vec::new();
        for option in &self.options {
            match groups
                .iter_mut()
                .find(|g| g.option_type == option.option_type)
            {
                Some(group) => group.options.push(option),
                None => groups.push(OptionGroup {
                    option_type: &option.option_type,
                    options: vec![option],
                }),
            }
        }
        groups
    }

    pub fn has_option(&self, option: &AwardOption) -> bool {
        option.award == self.id && self.options.iter().any(|o| o.id == option.id)
    }

    /// General option group choosing the item size: every option in it is
    /// named after an engraving option. `None` when the award has no
    /// engraving or no such group.
    pub fn item_size_group(&self) -> Option<OptionGroup<'_>> {
        let sizes: Vec<&str> = self
            .options
            .iter()
            .filter(|o| o.kind() == OptionKind::Engraving)
            .map(|o| o.name.as_str())
            .collect();
        if sizes.is_empty() {
            return None;
        }
        self.option_groups().into_iter().find(|g| {
            g.kind() == OptionKind::General
                && g.options.iter().all(|o| sizes.contains(&o.name.as_str()))
        })
    }
}

/// Options of one award sharing a `type`
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroup<'a> {
    pub option_type: &'a str,
    pub options: Vec<&'a AwardOption>,
}

/// How an option group is presented and resolved
#[derive(Debug, Clone, PartialEq)]
pub enum OptionField<'a> {
    /// Single, non-customizable option: the stored value is the option's own value
    Fixed(&'a AwardOption),
    /// Single customizable option: free text keyed by option name
    Text(&'a AwardOption),
    /// Several options: single choice keyed by option type
    Choice(Vec<&'a AwardOption>),
    /// Charity donation slots
    Pecsf(Vec<&'a AwardOption>),
    /// Engraving options, one per item size
    Engraving(Vec<&'a AwardOption>),
}

impl<'a> OptionGroup<'a> {
    pub fn kind(&self) -> OptionKind {
        OptionKind::of(self.option_type)
    }

    pub fn field(&self) -> OptionField<'a> {
        match (self.kind(), self.options.as_slice()) {
            (OptionKind::PecsfCharity, _) => OptionField::Pecsf(self.options.clone()),
            (OptionKind::Engraving, _) => OptionField::Engraving(self.options.clone()),
            (OptionKind::General, [single]) if single.customizable => OptionField::Text(*single),
            (OptionKind::General, [single]) => OptionField::Fixed(*single),
            (OptionKind::General, _) => OptionField::Choice(self.options.clone()),
        }
    }
}
