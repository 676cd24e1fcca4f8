pub mod aggregate;

pub use aggregate::{PecsfCharity, PecsfCharityId};
