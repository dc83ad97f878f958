//! Multi-polygon value type with union/intersection/difference algebra.

use geo::{Area, BooleanOps, BoundingRect};
use geo_types::{MultiPolygon, Polygon, Rect};

/// Default outward buffer for [`MapPolygon::extent`], in degrees.
pub const DEFAULT_EXTENT_BUFFER: f64 = 2.0;

/// Map extent in plotting order: left, right, lower, upper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub left: f64,
    pub right: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Extent {
    /// `(left, right, lower, upper)`, ready for positional use
    pub fn to_tuple(self) -> (f64, f64, f64, f64) {
        (self.left, self.right, self.lower, self.upper)
    }
}

/// One boundary, or a composition of several, as an ordered set of polygons.
///
/// Every operation returns a new `MapPolygon`; a single-polygon result is still
/// a one-element multi-polygon and a disjoint intersection is an empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPolygon {
    inner: MultiPolygon<f64>,
}

impl MapPolygon {
    pub fn new(polygons: Vec<Polygon<f64>>) -> Self {
        Self {
            inner: MultiPolygon::new(polygons),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn union(&self, other: &MapPolygon) -> MapPolygon {
        self.inner.union(&other.inner).into()
    }

    pub fn intersection(&self, other: &MapPolygon) -> MapPolygon {
        self.inner.intersection(&other.inner).into()
    }

    pub fn difference(&self, other: &MapPolygon) -> MapPolygon {
        self.inner.difference(&other.inner).into()
    }

    /// Bounding box grown outward by `buffer` degrees on every side.
    ///
    /// Returns `None` for an empty multi-polygon, which has no bounds.
    pub fn extent(&self, buffer: f64) -> Option<Extent> {
        let rect = self.bounding_rect()?;
        Some(Extent {
            left: rect.min().x - buffer,
            right: rect.max().x + buffer,
            lower: rect.min().y - buffer,
            upper: rect.max().y + buffer,
        })
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.inner.bounding_rect()
    }

    /// Unsigned planar area in square degrees
    pub fn area(&self) -> f64 {
        self.inner.unsigned_area()
    }

    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.inner.0
    }

    pub fn len(&self) -> usize {
        self.inner.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.0.is_empty()
    }

    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.inner
    }

    pub fn into_multi_polygon(self) -> MultiPolygon<f64> {
        self.inner
    }
}

impl Default for MapPolygon {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<MultiPolygon<f64>> for MapPolygon {
    fn from(inner: MultiPolygon<f64>) -> Self {
        Self { inner }
    }
}

impl From<Polygon<f64>> for MapPolygon {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::new(vec![polygon])
    }
}
