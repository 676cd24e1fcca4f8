pub mod aggregate;

pub use aggregate::{
    Award, AwardId, AwardOption, AwardOptionId, OptionField, OptionGroup, OptionKind,
    ENGRAVING_TYPE, PECSF_CHARITY_TYPE,
};
