//! Reads stored GeoJSON boundary assets into in-memory geometries.

use std::fs;
use std::path::{Path, PathBuf};

use geo_types::{Coord, LineString, MultiLineString, Polygon};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::MapPolygon;

/// Failure to turn a geometry reference into a geometry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("geometry has no 'type' field")]
    MissingType,

    #[error("unsupported geometry type '{kind}'")]
    UnsupportedType { kind: String },

    #[error("invalid coordinates: {reason}")]
    InvalidCoordinates { reason: String },
}

/// A loaded boundary: an area, or a set of lines for boundaries without one.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    Polygon(MapPolygon),
    Lines(MultiLineString<f64>),
}

impl BoundaryGeometry {
    pub fn as_polygon(&self) -> Option<&MapPolygon> {
        match self {
            BoundaryGeometry::Polygon(polygon) => Some(polygon),
            BoundaryGeometry::Lines(_) => None,
        }
    }

    pub fn into_polygon(self) -> Option<MapPolygon> {
        match self {
            BoundaryGeometry::Polygon(polygon) => Some(polygon),
            BoundaryGeometry::Lines(_) => None,
        }
    }
}

/// Resolves geometry references relative to a geojson directory.
#[derive(Debug, Clone)]
pub struct GeometryLoader {
    root: PathBuf,
}

impl GeometryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the asset at `reference` (relative to the root)
    pub fn load(&self, reference: &str) -> Result<BoundaryGeometry, LoadError> {
        let path = self.root.join(reference);
        debug!("Loading geometry from {}", path.display());

        let content = fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse { path, source })?;

        parse_geometry(&document)
    }
}

/// Convert a GeoJSON feature (with a `geometry` wrapper) or bare geometry.
///
/// Any type containing "Polygon" is flattened: every ring found in the
/// coordinates becomes its own polygon, holes included.
pub fn parse_geometry(document: &Value) -> Result<BoundaryGeometry, LoadError> {
    let geometry = document.get("geometry").unwrap_or(document);
    let kind = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or(LoadError::MissingType)?;
    let coordinates = geometry
        .get("coordinates")
        .ok_or_else(|| invalid("missing 'coordinates'"))?;

    if kind.contains("Polygon") {
        let mut rings = Vec::new();
        collect_rings(coordinates, &mut rings)?;
        let polygons = rings
            .into_iter()
            .map(|ring| Polygon::new(ring, vec![]))
            .collect();
        Ok(BoundaryGeometry::Polygon(MapPolygon::new(polygons)))
    } else if kind == "MultiLineString" {
        let lines = as_array(coordinates)?
            .iter()
            .map(parse_line)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BoundaryGeometry::Lines(MultiLineString::new(lines)))
    } else {
        Err(LoadError::UnsupportedType {
            kind: kind.to_string(),
        })
    }
}

/// Walk nested coordinate arrays, pushing every array of positions as a ring.
fn collect_rings(value: &Value, rings: &mut Vec<LineString<f64>>) -> Result<(), LoadError> {
    let items = as_array(value)?;
    if items.first().is_some_and(is_position) {
        rings.push(parse_line(value)?);
        return Ok(());
    }
    for item in items {
        collect_rings(item, rings)?;
    }
    Ok(())
}

fn parse_line(value: &Value) -> Result<LineString<f64>, LoadError> {
    let coords = as_array(value)?
        .iter()
        .map(parse_position)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}

fn is_position(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .is_some_and(Value::is_number)
}

fn parse_position(value: &Value) -> Result<Coord<f64>, LoadError> {
    let items = as_array(value)?;
    match (
        items.first().and_then(Value::as_f64),
        items.get(1).and_then(Value::as_f64),
    ) {
        (Some(x), Some(y)) => Ok(Coord { x, y }),
        _ => Err(invalid(format!("bad position {value}"))),
    }
}

fn as_array(value: &Value) -> Result<&Vec<Value>, LoadError> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("expected an array, found {value}")))
}

fn invalid(reason: impl Into<String>) -> LoadError {
    LoadError::InvalidCoordinates {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outer() -> Value {
        json!([[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]])
    }

    fn inner() -> Value {
        json!([[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0], [1.0, 1.0]])
    }

    #[test]
    fn test_polygon_and_multipolygon_agree() {
        let polygon = json!({"type": "Polygon", "coordinates": [outer(), inner()]});
        let multi = json!({
            "type": "Feature",
            "geometry": {"type": "MultiPolygon", "coordinates": [[outer()], [inner()]]}
        });

        let a = parse_geometry(&polygon).unwrap();
        let b = parse_geometry(&multi).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_polygon().unwrap().len(), 2);
    }

    #[test]
    fn test_every_ring_becomes_a_polygon() {
        let multi = json!({
            "type": "MultiPolygon",
            "coordinates": [[outer(), inner()], [inner()]]
        });
        let polygon = parse_geometry(&multi).unwrap().into_polygon().unwrap();
        assert_eq!(polygon.len(), 3);
        assert!(polygon.polygons().iter().all(|p| p.interiors().is_empty()));
    }

    #[test]
    fn test_multilinestring() {
        let lines = json!({
            "type": "MultiLineString",
            "coordinates": [[[0.0, 0.0], [1.0, 1.0]], [[2.0, 2.0], [3.0, 3.0, 10.0]]]
        });
        match parse_geometry(&lines).unwrap() {
            BoundaryGeometry::Lines(lines) => {
                assert_eq!(lines.0.len(), 2);
                assert_eq!(lines.0[1].0[1], Coord { x: 3.0, y: 3.0 });
            }
            other => panic!("expected lines, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_type() {
        let point = json!({"type": "Point", "coordinates": [1.0, 2.0]});
        assert!(matches!(
            parse_geometry(&point),
            Err(LoadError::UnsupportedType { kind }) if kind == "Point"
        ));
    }

    #[test]
    fn test_missing_type() {
        let bare = json!({"coordinates": []});
        assert!(matches!(parse_geometry(&bare), Err(LoadError::MissingType)));
    }

    #[test]
    fn test_malformed_position() {
        let broken = json!({"type": "Polygon", "coordinates": [[[0.0, "x"], [1.0, 1.0]]]});
        assert!(matches!(
            parse_geometry(&broken),
            Err(LoadError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let feature = json!({"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [outer()]}});
        fs::write(dir.path().join("a.json"), feature.to_string()).unwrap();

        let loader = GeometryLoader::new(dir.path());
        let geometry = loader.load("a.json").unwrap();
        assert_eq!(geometry.as_polygon().unwrap().area(), 16.0);

        assert!(matches!(
            loader.load("missing.json"),
            Err(LoadError::Read { .. })
        ));

        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        assert!(matches!(
            loader.load("bad.json"),
            Err(LoadError::Parse { .. })
        ));
    }
}
