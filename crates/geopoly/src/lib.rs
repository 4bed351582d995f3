//! Geometric measurements of simple polygons on the Earth's surface.
//!
//! Coordinates follow the GeoJSON convention: positions are `[lng, lat]` in
//! degrees and a polygon is read from its outer ring (`coordinates[0]`).
//!
//! Model
//! - Distances use the haversine formula on a sphere (`GeoCfg::earth_radius`).
//! - Area uses a spherical-excess approximation (orientation-independent).
//! - The centroid is the planar shoelace centroid taken directly on lng/lat.
//! - The enclosing circle is `{centroid, max vertex distance}`; this is an
//!   approximation, not a true minimum enclosing circle.
//!
//! Degenerate rings (zero signed area) are reported as `GeoError::Degenerate`
//! instead of producing NaN or infinite centroids.

pub mod cfg;
pub mod error;
pub mod geojson;
pub mod point;
pub mod polygon;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{GeoCfg, EARTH_RADIUS_M};
pub use error::GeoError;
pub use point::GeoPoint;
pub use polygon::{Circle, GeoPolygon};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{GeoCfg, EARTH_RADIUS_M};
    pub use crate::error::GeoError;
    pub use crate::geojson::{parse_polygons, polygons};
    pub use crate::point::{haversine, GeoPoint};
    pub use crate::polygon::{Circle, GeoPolygon};
}

#[cfg(test)]
mod tests;
