pub mod aggregate;
pub mod fields;
pub mod sections;

pub use aggregate::{AddressDto, ContactDto, RecipientDto, RecipientId, ServiceDto, SupervisorDto};
pub use sections::{registration_sections, SectionName};
