//! Common types and traits shared by all aggregates

pub mod aggregate_id;

// Re-exports
pub use aggregate_id::AggregateId;
