//! Recipient Registration UI Module
//!
//! MVVM pattern implementation:
//! - model.rs: API functions (fetch, save, delete, lookups)
//! - view_model.rs: ViewModel binding the form orchestrator to signals
//! - view.rs: Leptos components (pure UI)

mod model;
mod view;
mod view_model;

pub use view::RegistrationDetails;
pub use view_model::{prepare_submission, RegistrationViewModel};
