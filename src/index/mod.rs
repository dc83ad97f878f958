//! Boundary resolution over a record store.
//!
//! Validates each supplied name on its own, derives the resolution level,
//! runs one combined query and attaches geometries to the matching records.

mod names;
mod resolver;
mod sqlite;
mod store;

pub use names::project_names;
pub use resolver::{BoundaryIndex, Resolved, ResolvedBoundary};
pub use sqlite::SqliteRecordStore;
pub use store::{RecordFilter, RecordStore, StoreError};
