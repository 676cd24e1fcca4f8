use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Unique identifier of a registered PECSF charity
    PecsfCharityId
);

/// A charity a recipient can donate the award value to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PecsfCharity {
    pub id: PecsfCharityId,
    pub label: String,
    pub region: String,
    #[serde(default)]
    pub vendor: String,
    /// Regional pooled fund rather than an individual charity
    #[serde(default)]
    pub pooled: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PecsfCharity {
    /// Charities offered in "individual charities" mode
    pub fn individual(charities: &[PecsfCharity]) -> Vec<&PecsfCharity> {
        charities.iter().filter(|c| c.active && !c.pooled).collect()
    }

    /// Pooled funds offered in "pooled fund" mode, optionally limited to one region
    pub fn pooled_funds<'a>(charities: &'a [PecsfCharity], region: Option<&str>) -> Vec<&'a PecsfCharity> {
        charities
            .iter()
            .filter(|c| c.active && c.pooled)
            .filter(|c| region.map_or(true, |r| c.region == r))
            .collect()
    }
}
