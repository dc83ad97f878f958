//! Core data models for boundary resolution.

pub mod admin;
pub mod criteria;

pub use admin::{AdminLevel, AdministrativeRecord};
pub use criteria::{Criteria, RecordMode, DEFAULT_COUNTRY, DEFAULT_SOURCE};
