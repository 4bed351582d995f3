//! Geographic point (`[lng, lat]` in degrees) and haversine distance.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::cfg::GeoCfg;
use crate::error::GeoError;
use crate::geojson::position;

/// Immutable longitude/latitude pair in degrees.
///
/// Invariants:
/// - Coordinates are stored exactly as given (no wrapping or clamping).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Position in GeoJSON order `[lng, lat]`.
    #[inline]
    pub fn coordinates(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Great-circle distance in meters on the default sphere.
    #[inline]
    pub fn distance_with(&self, other: &GeoPoint) -> f64 {
        self.distance_with_cfg(other, GeoCfg::default())
    }

    /// Great-circle distance in meters on the sphere described by `cfg`.
    #[inline]
    pub fn distance_with_cfg(&self, other: &GeoPoint, cfg: GeoCfg) -> f64 {
        haversine(self, other, cfg.earth_radius)
    }

    /// `{"type": "Point", "coordinates": [lng, lat]}`.
    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Point",
            "coordinates": [self.lng, self.lat],
        })
    }

    /// Parse a GeoJSON Point geometry (extra altitude element ignored).
    pub fn from_geojson(value: &Value) -> Result<Self, GeoError> {
        match value.get("type").and_then(Value::as_str) {
            Some("Point") | None => {}
            Some(other) => {
                return Err(GeoError::WrongType {
                    expected: "Point",
                    found: other.to_string(),
                })
            }
        }
        let coords = value
            .get("coordinates")
            .ok_or(GeoError::MalformedPosition { index: 0 })?;
        Ok(Self::from(position(coords, 0)?))
    }
}

impl From<[f64; 2]> for GeoPoint {
    #[inline]
    fn from(c: [f64; 2]) -> Self {
        Self { lng: c[0], lat: c[1] }
    }
}

impl From<GeoPoint> for [f64; 2] {
    #[inline]
    fn from(p: GeoPoint) -> Self {
        p.coordinates()
    }
}

/// Haversine distance between `a` and `b` on a sphere of radius `radius`.
///
/// Symmetric up to rounding; zero for identical points.
pub fn haversine(a: &GeoPoint, b: &GeoPoint, radius: f64) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let dlat = lat_b - lat_a;
    let dlng = b.lng.to_radians() - a.lng.to_radians();
    let sin_dlat_half = (dlat / 2.0).sin();
    let sin_dlng_half = (dlng / 2.0).sin();
    let h = sin_dlat_half * sin_dlat_half
        + lat_a.cos() * lat_b.cos() * sin_dlng_half * sin_dlng_half;
    // Rounding can push h just past 1 for antipodal pairs.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    c * radius
}
