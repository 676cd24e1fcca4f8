pub mod common;

pub mod a001_award;
pub mod a002_recipient;
pub mod a003_service;
pub mod a004_pecsf_charity;
