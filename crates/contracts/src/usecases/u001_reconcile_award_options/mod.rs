//! Award options reconciliation
//!
//! Matches the option input of the award fieldset, and the recipient's
//! stored selections, against the option schema of the selected award.

pub mod input;
pub mod reconcile;
pub mod rules;

pub use input::{initial_input, item_size, AwardOptionInput, EngravingInput, PecsfInput, PecsfMode};
pub use reconcile::{engraving_limit, reconcile, ReconcileError};
pub use rules::{award_input_rules, engraving_rules};

#[cfg(test)]
mod tests;
