use std::fmt;

/// Errors surfaced while reading GeoJSON or measuring a polygon.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoError {
    /// The geometry declares a `type` other than the one being parsed.
    WrongType { expected: &'static str, found: String },
    /// `coordinates` is missing or has no outer ring.
    MissingRing,
    /// Position at `index` of the outer ring is not at least `[lng, lat]`.
    MalformedPosition { index: usize },
    /// Position at `index` holds a NaN or infinite coordinate.
    NonFiniteCoordinate { index: usize },
    /// Shoelace signed area is zero or not finite; no centroid exists.
    Degenerate { signed_area: f64 },
    /// Input text is not valid JSON.
    Json(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { expected, found } => {
                write!(f, "expected a {expected} geometry, found {found:?}")
            }
            Self::MissingRing => write!(f, "polygon has no outer ring"),
            Self::MalformedPosition { index } => {
                write!(f, "position {index} is not a [lng, lat] pair of numbers")
            }
            Self::NonFiniteCoordinate { index } => {
                write!(f, "position {index} has a non-finite coordinate")
            }
            Self::Degenerate { signed_area } => write!(
                f,
                "ring is degenerate (signed area {signed_area}); centroid is undefined"
            ),
            Self::Json(msg) => write!(f, "invalid GeoJSON text: {msg}"),
        }
    }
}

impl std::error::Error for GeoError {}

impl From<serde_json::Error> for GeoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
