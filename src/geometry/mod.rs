//! Boundary geometries: loading from disk and polygon algebra.

mod loader;
mod polygon;

pub use loader::{parse_geometry, BoundaryGeometry, GeometryLoader, LoadError};
pub use polygon::{Extent, MapPolygon, DEFAULT_EXTENT_BUFFER};
