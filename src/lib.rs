//! cnbounds - administrative boundary resolution for Chinese map data
//!
//! Resolves partial country/province/city/district criteria against a
//! boundary record store and composes the resulting multi-polygons.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod index;
pub mod models;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{Defaults, IndexConfig};
pub use error::{BoundaryError, ConfigError, NotFoundStage};
pub use geometry::{BoundaryGeometry, Extent, GeometryLoader, LoadError, MapPolygon};
pub use index::{BoundaryIndex, RecordStore, Resolved, ResolvedBoundary, SqliteRecordStore};
pub use models::{AdminLevel, AdministrativeRecord, Criteria, RecordMode};
