pub mod orchestrator;
pub mod record;

pub use orchestrator::{FormError, FormOrchestrator, FormPhase, FormSnapshot};
pub use record::FormRecord;
