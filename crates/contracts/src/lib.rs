//! Shared contracts of the Long Service Awards front-end: domain types,
//! field validation and the award options reconciler.

pub mod domain;
pub mod shared;
pub mod usecases;
