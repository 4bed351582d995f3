//! Scenario tests over the sample GeoJSON fixtures plus property checks.

use super::prelude::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::{json, Value};

const CAMPUS: &str = include_str!("../testdata/campus.geojson");
const SQUARE: &str = include_str!("../testdata/square.geojson");

fn first_polygon(text: &str) -> (GeoPolygon, Value) {
    let doc: Value = serde_json::from_str(text).unwrap();
    let geometry = polygons(&doc)[0].clone();
    (GeoPolygon::from_geojson(&geometry).unwrap(), geometry)
}

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

/// Star-shaped ring around (lng, lat): evenly spaced angles, per-vertex radius in degrees.
fn star_ring(lng: f64, lat: f64, radii: &[f64]) -> Vec<[f64; 2]> {
    let n = radii.len();
    radii
        .iter()
        .enumerate()
        .map(|(k, r)| {
            let th = std::f64::consts::TAU * k as f64 / n as f64;
            [lng + r * th.cos(), lat + r * th.sin()]
        })
        .collect()
}

#[test]
fn campus_points_match_fixture() {
    let (campus, geometry) = first_polygon(CAMPUS);
    let ring = geometry["coordinates"][0].as_array().unwrap();
    assert_eq!(campus.count(), ring.len());
    for (i, raw) in ring.iter().enumerate() {
        assert_eq!(
            campus.point(i).unwrap().to_geojson(),
            json!({"type": "Point", "coordinates": raw})
        );
    }
}

#[test]
fn campus_area_regression() {
    let (campus, _) = first_polygon(CAMPUS);
    let area = campus.area();
    assert!(rel_close(area, 164_612.369_938_280_43, 1e-9), "got {area}");
}

#[test]
fn campus_circle_regression() {
    let (campus, _) = first_polygon(CAMPUS);
    let circle = campus.circle().unwrap();
    assert!((circle.center.lng - 2.350_551_317_383_481).abs() < 1e-9);
    assert!((circle.center.lat - 48.844_931_756_343_86).abs() < 1e-9);
    assert!((circle.radius - 260.839_728_559_800_1).abs() < 1e-6);
}

#[test]
fn campus_radius_is_max_vertex_distance() {
    let (campus, _) = first_polygon(CAMPUS);
    let center = campus.center().unwrap();
    let radius = campus.radius().unwrap();
    let max = (0..campus.count())
        .map(|i| campus.point(i).unwrap().distance_with(&center))
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(radius, max);
}

#[test]
fn center_is_memoized_across_queries() {
    let (campus, _) = first_polygon(CAMPUS);
    assert!(!campus.is_center_cached());
    let via_circle = campus.circle().unwrap().center;
    assert!(campus.is_center_cached());
    assert_eq!(campus.center().unwrap(), via_circle);
    assert_eq!(campus.center().unwrap(), campus.center().unwrap());
}

#[test]
fn square_area_within_approximation_bound() {
    let (square, _) = first_polygon(SQUARE);
    let side = square.point(1).unwrap().distance_with(&square.point(0).unwrap());
    let area = square.area();
    assert!(area >= side * side, "area {area} below side² {}", side * side);
    // spherical-excess approximation stays within 3.3% of side² for small squares
    assert!(area < side * side * 1.033);
}

#[test]
fn square_fixture_skips_point_features() {
    let found = parse_polygons(SQUARE).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].count(), 5);
}

#[test]
fn campus_area_ignores_winding() {
    let (campus, _) = first_polygon(CAMPUS);
    let mut reversed = campus.vertices().to_vec();
    reversed.reverse();
    let reversed = GeoPolygon::from_ring(reversed).unwrap();
    assert!(rel_close(reversed.area(), campus.area(), 1e-9));
    let (a, b) = (campus.center().unwrap(), reversed.center().unwrap());
    assert!((a.lng - b.lng).abs() < 1e-9 && (a.lat - b.lat).abs() < 1e-9);
}

#[test]
fn triangle_center_is_vertex_mean_seeded() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..64 {
        let ring: Vec<[f64; 2]> = (0..3)
            .map(|_| [rng.gen_range(-170.0..170.0), rng.gen_range(-80.0..80.0)])
            .collect();
        let tri = GeoPolygon::from_ring(ring.clone()).unwrap();
        let c = tri.center().unwrap();
        let mean_lng = ring.iter().map(|p| p[0]).sum::<f64>() / 3.0;
        let mean_lat = ring.iter().map(|p| p[1]).sum::<f64>() / 3.0;
        assert!((c.lng - mean_lng).abs() < 1e-6, "{c:?} vs {mean_lng}");
        assert!((c.lat - mean_lat).abs() < 1e-6, "{c:?} vs {mean_lat}");
    }
}

proptest! {
    #[test]
    fn distance_is_symmetric(
        a_lng in -180.0f64..180.0, a_lat in -90.0f64..90.0,
        b_lng in -180.0f64..180.0, b_lat in -90.0f64..90.0
    ) {
        let a = GeoPoint::new(a_lng, a_lat);
        let b = GeoPoint::new(b_lng, b_lat);
        let (ab, ba) = (a.distance_with(&b), b.distance_with(&a));
        prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn distance_to_self_is_zero(lng in -180.0f64..180.0, lat in -90.0f64..90.0) {
        let p = GeoPoint::new(lng, lat);
        prop_assert_eq!(p.distance_with(&p), 0.0);
    }

    #[test]
    fn point_geojson_round_trip(lng in -180.0f64..180.0, lat in -90.0f64..90.0) {
        let p = GeoPoint::from([lng, lat]);
        let g = p.to_geojson();
        prop_assert_eq!(&g["coordinates"], &json!([lng, lat]));
        prop_assert_eq!(GeoPoint::from_geojson(&g), Ok(p));
    }

    #[test]
    fn area_ignores_winding(
        lng in -170.0f64..170.0,
        lat in -60.0f64..60.0,
        radii in prop::collection::vec(0.01f64..1.0, 3..16)
    ) {
        let ring = star_ring(lng, lat, &radii);
        let mut rev = ring.clone();
        rev.reverse();
        let fwd = GeoPolygon::from_ring(ring).unwrap();
        let bwd = GeoPolygon::from_ring(rev).unwrap();
        prop_assert!(rel_close(fwd.area(), bwd.area(), 1e-8));
    }

    #[test]
    fn radius_is_max_vertex_distance(
        lng in -170.0f64..170.0,
        lat in -60.0f64..60.0,
        radii in prop::collection::vec(0.01f64..1.0, 3..16)
    ) {
        let poly = GeoPolygon::from_ring(star_ring(lng, lat, &radii)).unwrap();
        let circle = poly.circle().unwrap();
        let mut max = f64::NEG_INFINITY;
        for i in 0..poly.count() {
            let d = poly.point(i).unwrap().distance_with(&circle.center);
            prop_assert!(d.is_finite());
            prop_assert!(d <= circle.radius);
            max = max.max(d);
        }
        prop_assert_eq!(max, circle.radius);
    }
}
