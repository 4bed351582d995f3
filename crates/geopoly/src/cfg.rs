//! Reference sphere used by distance and area computations.
//!
//! Policy
//! - The default is the WGS84 equatorial radius on a spherical model. Other
//!   spheres (mean radius, other bodies) are passed explicitly; nothing reads
//!   a process-wide constant at call time.

/// WGS84 equatorial radius (semi-major axis), in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Geodesy configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCfg {
    /// Sphere radius in meters; distances scale linearly, areas quadratically.
    pub earth_radius: f64,
}

impl GeoCfg {
    #[inline]
    pub fn with_radius(earth_radius: f64) -> Self {
        Self { earth_radius }
    }
}

impl Default for GeoCfg {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_RADIUS_M,
        }
    }
}

/// Relative threshold on the shoelace signed area, against the sum of the
/// absolute cross terms, below which a ring is treated as degenerate.
pub(crate) const AREA_REL_EPS: f64 = 1e-12;
