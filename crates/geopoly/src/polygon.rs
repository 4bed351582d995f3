//! Polygon on the sphere, read from the outer ring of a GeoJSON Polygon.
//!
//! Conventions
//! - Edges are `(i, i-1)` with wraparound, so the ring is treated as closed
//!   whether or not the last position repeats the first. A repeated closing
//!   position contributes a zero-length edge and changes nothing.
//! - Winding order is free: area takes an absolute value, and the centroid
//!   formula is invariant under reversal.
//! - The centroid is computed once per instance and shared by `center`,
//!   `radius` and `circle`.

use std::sync::OnceLock;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cfg::{GeoCfg, AREA_REL_EPS};
use crate::error::GeoError;
use crate::geojson::outer_ring;
use crate::point::GeoPoint;

/// Approximate enclosing circle: centroid plus max vertex distance (meters).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: GeoPoint,
    pub radius: f64,
}

/// Simple polygon given by an ordered `[lng, lat]` ring.
///
/// Invariants:
/// - `vertices` is never mutated after construction; `count()` is its length.
/// - All coordinates are finite.
/// - The centroid cache is written at most once.
#[derive(Clone, Debug)]
pub struct GeoPolygon {
    vertices: Vec<[f64; 2]>,
    cfg: GeoCfg,
    center: OnceLock<Result<GeoPoint, GeoError>>,
}

impl GeoPolygon {
    /// Build from raw `[lng, lat]` positions (closure, winding and vertex
    /// count are not checked).
    pub fn from_ring(vertices: Vec<[f64; 2]>) -> Result<Self, GeoError> {
        if let Some(index) = vertices
            .iter()
            .position(|v| !(v[0].is_finite() && v[1].is_finite()))
        {
            return Err(GeoError::NonFiniteCoordinate { index });
        }
        Ok(Self {
            vertices,
            cfg: GeoCfg::default(),
            center: OnceLock::new(),
        })
    }

    /// Build from a GeoJSON Polygon geometry; only `coordinates[0]` is read.
    pub fn from_geojson(geometry: &Value) -> Result<Self, GeoError> {
        Self::from_ring(outer_ring(geometry)?)
    }

    /// Replace the reference sphere used by `area`, `radius` and `circle`.
    #[must_use]
    pub fn with_cfg(mut self, cfg: GeoCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn cfg(&self) -> GeoCfg {
        self.cfg
    }

    /// Number of stored positions, including an explicit closing position.
    #[inline]
    pub fn count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    /// Vertex `i` as a fresh point; `None` when `i >= count()`.
    #[inline]
    pub fn point(&self, i: usize) -> Option<GeoPoint> {
        self.vertices.get(i).copied().map(GeoPoint::from)
    }

    /// Spherical-excess area approximation in square meters.
    ///
    /// Recomputed on every call. Rings with fewer than three positions
    /// yield `0.0`.
    pub fn area(&self) -> f64 {
        if self.count() < 3 {
            return 0.0;
        }
        let acc: f64 = edges(self.count())
            .map(|(i, j)| {
                let a = self.vertices[i];
                let b = self.vertices[j];
                (a[0] - b[0]).to_radians()
                    * (2.0 + a[1].to_radians().sin() + b[1].to_radians().sin())
            })
            .sum();
        let r = self.cfg.earth_radius;
        acc.abs() / 2.0 * r * r
    }

    /// Planar shoelace centroid on lng/lat (memoized).
    ///
    /// Errors with `GeoError::Degenerate` when the ring encloses no area.
    pub fn center(&self) -> Result<GeoPoint, GeoError> {
        self.center
            .get_or_init(|| shoelace_centroid(&self.vertices))
            .clone()
    }

    /// Whether the centroid has already been computed for this instance.
    #[inline]
    pub fn is_center_cached(&self) -> bool {
        self.center.get().is_some()
    }

    /// Max great-circle distance (meters) from the centroid to any vertex.
    pub fn radius(&self) -> Result<f64, GeoError> {
        let center = self.center()?;
        Ok(self
            .vertices
            .iter()
            .map(|&v| GeoPoint::from(v).distance_with_cfg(&center, self.cfg))
            .fold(0.0, f64::max))
    }

    /// Cached centroid plus a freshly computed radius.
    pub fn circle(&self) -> Result<Circle, GeoError> {
        Ok(Circle {
            center: self.center()?,
            radius: self.radius()?,
        })
    }
}

/// Edge index pairs `(i, i-1)`, starting with `(0, n-1)`.
#[inline]
fn edges(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).map(move |i| (i, if i == 0 { n - 1 } else { i - 1 }))
}

/// Signed area of the parallelogram spanned by `a` and `b`.
#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

fn shoelace_centroid(ring: &[[f64; 2]]) -> Result<GeoPoint, GeoError> {
    let mut acc: Vector2<f64> = Vector2::zeros();
    let mut twice_area = 0.0;
    let mut magnitude = 0.0;
    for (i, j) in edges(ring.len()) {
        let a = Vector2::new(ring[i][0], ring[i][1]);
        let b = Vector2::new(ring[j][0], ring[j][1]);
        // A.lat * B.lng - B.lat * A.lng
        let f = cross(b, a);
        acc += (a + b) * f;
        twice_area += f;
        magnitude += f.abs();
    }
    let signed_area = twice_area / 2.0;
    // Collinear rings cancel to rounding noise rather than exactly zero.
    let encloses_area = signed_area.abs() > AREA_REL_EPS * magnitude;
    if !encloses_area {
        return Err(GeoError::Degenerate { signed_area });
    }
    let c = acc / (6.0 * signed_area);
    if !(c.x.is_finite() && c.y.is_finite()) {
        return Err(GeoError::Degenerate { signed_area });
    }
    Ok(GeoPoint::new(c.x, c.y))
}
