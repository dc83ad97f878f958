//! GeoJSON output for resolved boundaries.

use geo_types::{LineString, Polygon};
use serde::Serialize;
use serde_json::{json, Value};

use crate::geometry::BoundaryGeometry;
use crate::index::{Resolved, ResolvedBoundary};
use crate::models::AdministrativeRecord;

/// A boundary in GeoJSON Feature form
#[derive(Debug, Serialize)]
pub struct Feature<'a> {
    #[serde(rename = "type")]
    pub feature_type: &'static str,
    pub geometry: Value,
    pub properties: &'a AdministrativeRecord,
}

impl<'a> Feature<'a> {
    pub fn from_boundary(boundary: &'a ResolvedBoundary) -> Self {
        Self {
            feature_type: "Feature",
            geometry: geometry_to_json(&boundary.geometry),
            properties: &boundary.record,
        }
    }
}

fn ring_to_json(ring: &LineString<f64>) -> Value {
    Value::Array(ring.coords().map(|c| json!([c.x, c.y])).collect())
}

fn polygon_to_json(polygon: &Polygon<f64>) -> Value {
    let mut rings = vec![ring_to_json(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring_to_json));
    Value::Array(rings)
}

/// GeoJSON geometry object; areas are always written as MultiPolygon.
pub fn geometry_to_json(geometry: &BoundaryGeometry) -> Value {
    match geometry {
        BoundaryGeometry::Polygon(polygon) => json!({
            "type": "MultiPolygon",
            "coordinates": polygon.polygons().iter().map(polygon_to_json).collect::<Vec<_>>(),
        }),
        BoundaryGeometry::Lines(lines) => json!({
            "type": "MultiLineString",
            "coordinates": lines.0.iter().map(ring_to_json).collect::<Vec<_>>(),
        }),
    }
}

pub fn feature_collection<'a>(
    boundaries: impl IntoIterator<Item = &'a ResolvedBoundary>,
) -> serde_json::Result<Value> {
    let features = boundaries
        .into_iter()
        .map(|b| serde_json::to_value(Feature::from_boundary(b)))
        .collect::<serde_json::Result<Vec<_>>>()?;
    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

/// GeoJSON for any resolution shape.
///
/// Record results become a FeatureCollection; bare geometries become a
/// GeometryCollection or a single geometry.
pub fn resolved_to_json(resolved: &Resolved) -> serde_json::Result<Value> {
    match resolved {
        Resolved::All(boundaries) => feature_collection(boundaries),
        Resolved::First(boundary) => feature_collection(std::iter::once(boundary)),
        Resolved::Geometries(geometries) => Ok(json!({
            "type": "GeometryCollection",
            "geometries": geometries.iter().map(geometry_to_json).collect::<Vec<_>>(),
        })),
        Resolved::Geometry(geometry) => Ok(geometry_to_json(geometry)),
    }
}
