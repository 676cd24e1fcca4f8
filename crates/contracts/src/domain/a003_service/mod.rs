pub mod aggregate;

pub use aggregate::{Milestone, OptionSelection, ServiceId};
