use crate::domain::a001_award::{Award, AwardOption, OptionKind};
use crate::domain::a004_pecsf_charity::PecsfCharityId;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_id!(
    /// Unique identifier of one service-cycle record of a recipient
    ServiceId
);

// ============================================================================
// Milestone
// ============================================================================

/// Years-of-service threshold qualifying a recipient for an award tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Milestone(u32);

impl Milestone {
    pub const MIN: u32 = 5;
    pub const MAX: u32 = 50;
    pub const STEP: u32 = 5;

    pub fn new(years: u32) -> Option<Self> {
        ((Self::MIN..=Self::MAX).contains(&years) && years % Self::STEP == 0).then_some(Self(years))
    }

    pub fn years(&self) -> u32 {
        self.0
    }

    pub fn all() -> Vec<Milestone> {
        (Self::MIN..=Self::MAX)
            .step_by(Self::STEP as usize)
            .map(Milestone)
            .collect()
    }
}

impl TryFrom<u32> for Milestone {
    type Error = String;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        Milestone::new(years).ok_or_else(|| format!("Invalid milestone: {} years", years))
    }
}

impl From<Milestone> for u32 {
    fn from(m: Milestone) -> Self {
        m.0
    }
}

// ============================================================================
// Option selection
// ============================================================================

/// A recipient's confirmed choice for one award option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    pub service: ServiceId,
    pub award_option: AwardOption,
    #[serde(default)]
    pub custom_value: Option<String>,
    #[serde(default)]
    pub pecsf_charity: Option<PecsfCharityId>,
}

impl OptionSelection {
    /// The option must belong to `award`; an engraving selection must match
    /// the chosen item size.
    pub fn is_valid_for(&self, award: &Award, item_size: Option<&str>) -> bool {
        if !award.has_option(&self.award_option) {
            return false;
        }
        match self.award_option.kind() {
            OptionKind::Engraving => item_size == Some(self.award_option.name.as_str()),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_award::aggregate::fixtures::{award as award_fixture, option};
    use crate::domain::a001_award::ENGRAVING_TYPE;

    #[test]
    fn test_milestone_bounds() {
        assert!(Milestone::new(5).is_some());
        assert!(Milestone::new(50).is_some());
        assert!(Milestone::new(0).is_none());
        assert!(Milestone::new(12).is_none());
        assert!(Milestone::new(55).is_none());
        assert_eq!(Milestone::all().len(), 10);
    }

    #[test]
    fn test_milestone_serde() {
        let m: Milestone = serde_json::from_str("25").unwrap();
        assert_eq!(m.years(), 25);
        assert!(serde_json::from_str::<Milestone>("26").is_err());
        assert_eq!(serde_json::to_string(&m).unwrap(), "25");
    }

    #[test]
    fn test_selection_validity() {
        let award = award_fixture(|id| {
            vec![
                option(id, "strap", "strap", "leather"),
                option(id, ENGRAVING_TYPE, "small", "20"),
                option(id, ENGRAVING_TYPE, "large", "50"),
            ]
        });
        let other = award_fixture(|id| vec![option(id, "strap", "strap", "metal")]);
        let service = ServiceId::new_v4();
        let selection = |award_option: &AwardOption| OptionSelection {
            service,
            award_option: award_option.clone(),
            custom_value: None,
            pecsf_charity: None,
        };

        assert!(selection(&award.options[0]).is_valid_for(&award, None));
        assert!(!selection(&other.options[0]).is_valid_for(&award, None));
        assert!(selection(&award.options[2]).is_valid_for(&award, Some("large")));
        assert!(!selection(&award.options[1]).is_valid_for(&award, Some("large")));
        assert!(!selection(&award.options[1]).is_valid_for(&award, None));
    }
}
