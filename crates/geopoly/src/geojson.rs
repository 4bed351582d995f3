//! GeoJSON document helpers.
//!
//! Only what the measurements consume is read: Point positions and the outer
//! ring of Polygon geometries. Holes, MultiPolygons and CRS members are
//! ignored.

use serde_json::Value;

use crate::error::GeoError;
use crate::polygon::GeoPolygon;

/// Collect every Polygon geometry in `doc`, in document order.
///
/// Accepts a FeatureCollection, a Feature, a GeometryCollection or a bare
/// geometry. Other geometry types are skipped.
pub fn polygons(doc: &Value) -> Vec<&Value> {
    let mut out = Vec::new();
    collect_polygons(doc, &mut out);
    out
}

fn collect_polygons<'a>(v: &'a Value, out: &mut Vec<&'a Value>) {
    match v.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            for f in v.get("features").and_then(Value::as_array).into_iter().flatten() {
                collect_polygons(f, out);
            }
        }
        Some("Feature") => {
            if let Some(g) = v.get("geometry") {
                collect_polygons(g, out);
            }
        }
        Some("GeometryCollection") => {
            for g in v.get("geometries").and_then(Value::as_array).into_iter().flatten() {
                collect_polygons(g, out);
            }
        }
        Some("Polygon") => out.push(v),
        _ => {}
    }
}

/// Parse GeoJSON text and build a polygon for each Polygon geometry found.
pub fn parse_polygons(text: &str) -> Result<Vec<GeoPolygon>, GeoError> {
    let doc: Value = serde_json::from_str(text)?;
    polygons(&doc)
        .into_iter()
        .map(GeoPolygon::from_geojson)
        .collect()
}

/// Outer ring (`coordinates[0]`) of a Polygon geometry.
///
/// A missing `type` is accepted; any other `type` is rejected.
pub(crate) fn outer_ring(geometry: &Value) -> Result<Vec<[f64; 2]>, GeoError> {
    match geometry.get("type").and_then(Value::as_str) {
        Some("Polygon") | None => {}
        Some(other) => {
            return Err(GeoError::WrongType {
                expected: "Polygon",
                found: other.to_string(),
            })
        }
    }
    let ring = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .and_then(|rings| rings.first())
        .and_then(Value::as_array)
        .ok_or(GeoError::MissingRing)?;
    ring.iter()
        .enumerate()
        .map(|(i, pos)| position(pos, i))
        .collect()
}

/// `[lng, lat]` from a GeoJSON position; a trailing altitude is ignored.
pub(crate) fn position(v: &Value, index: usize) -> Result<[f64; 2], GeoError> {
    let arr = v
        .as_array()
        .filter(|a| a.len() >= 2)
        .ok_or(GeoError::MalformedPosition { index })?;
    let lng = arr[0]
        .as_f64()
        .ok_or(GeoError::MalformedPosition { index })?;
    let lat = arr[1]
        .as_f64()
        .ok_or(GeoError::MalformedPosition { index })?;
    if !(lng.is_finite() && lat.is_finite()) {
        return Err(GeoError::NonFiniteCoordinate { index });
    }
    Ok([lng, lat])
}
