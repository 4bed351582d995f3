use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use geopoly::geojson::parse_polygons;
use geopoly::{Circle, GeoCfg, GeoPoint, GeoPolygon, EARTH_RADIUS_M};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{InputRecord, MeasureProvenance};

#[derive(Parser)]
#[command(name = "geopoly")]
#[command(about = "Measure GeoJSON polygons on a spherical Earth")]
struct Cmd {
    /// Reference sphere radius in meters
    #[arg(long, global = true, default_value_t = EARTH_RADIUS_M, value_parser = parse_radius)]
    earth_radius: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Area, centroid and enclosing radius of one polygon in a GeoJSON file
    Measure {
        #[arg(long)]
        input: PathBuf,
        /// Which Polygon geometry of the document to measure (document order)
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Also write the result here, with a provenance sidecar
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Great-circle distance in meters between two `lng,lat` points
    Distance {
        #[arg(long, value_parser = parse_lnglat, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(long, value_parser = parse_lnglat, allow_hyphen_values = true)]
        to: GeoPoint,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Output document of `measure`; `circle` is null for degenerate rings.
#[derive(Debug, Serialize)]
struct Measurement {
    vertices: usize,
    area_m2: f64,
    circle: Option<Circle>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = GeoCfg::with_radius(cmd.earth_radius);
    match cmd.action {
        Action::Measure { input, index, out } => measure(&input, index, out.as_deref(), cfg),
        Action::Distance { from, to } => distance(from, to, cfg),
        Action::Report => report(cfg),
    }
}

fn measure(input: &Path, index: usize, out: Option<&Path>, cfg: GeoCfg) -> Result<()> {
    let (poly, source) = load_polygon(input, index, cfg)?;
    let m = measure_polygon(&poly);
    tracing::info!(
        input = %input.display(),
        crc32 = %source.crc32,
        index,
        vertices = m.vertices,
        area_m2 = m.area_m2,
        "measure"
    );
    let body = serde_json::to_string_pretty(&m)?;
    println!("{body}");

    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating output dir {}", parent.display()))?;
            }
        }
        std::fs::write(out, body.as_bytes())
            .with_context(|| format!("writing {}", out.display()))?;
        let prov = MeasureProvenance::new(source, index, m.vertices, cfg.earth_radius, out)
            .write()?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote");
    }
    Ok(())
}

/// Polygon `index` of the GeoJSON document at `input`, plus a record of the file read.
fn load_polygon(input: &Path, index: usize, cfg: GeoCfg) -> Result<(GeoPolygon, InputRecord)> {
    let raw = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let text = std::str::from_utf8(&raw)
        .with_context(|| format!("{} is not UTF-8", input.display()))?;
    let found = parse_polygons(text).with_context(|| format!("parsing {}", input.display()))?;
    let total = found.len();
    let poly = found
        .into_iter()
        .nth(index)
        .map(|p| p.with_cfg(cfg))
        .ok_or_else(|| {
            anyhow!(
                "{} holds {total} polygon(s); index {index} is out of range",
                input.display()
            )
        })?;
    Ok((poly, InputRecord::new(input, &raw)))
}

fn measure_polygon(poly: &GeoPolygon) -> Measurement {
    let circle = match poly.circle() {
        Ok(c) => Some(c),
        Err(err) => {
            tracing::warn!(%err, "no enclosing circle");
            None
        }
    };
    Measurement {
        vertices: poly.count(),
        area_m2: poly.area(),
        circle,
    }
}

fn distance(from: GeoPoint, to: GeoPoint, cfg: GeoCfg) -> Result<()> {
    let meters = from.distance_with_cfg(&to, cfg);
    tracing::info!(?from, ?to, meters, "distance");
    println!("{meters}");
    Ok(())
}

fn report(cfg: GeoCfg) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "version": geopoly::VERSION,
        "earth_radius": cfg.earth_radius,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Sphere radius in meters; must be finite and positive.
fn parse_radius(s: &str) -> Result<f64, String> {
    let r: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("bad radius {s:?}: {e}"))?;
    if !(r.is_finite() && r > 0.0) {
        return Err(format!("radius must be finite and positive, got {s:?}"));
    }
    Ok(r)
}

/// Parse `lng,lat` (degrees) into a point.
fn parse_lnglat(s: &str) -> Result<GeoPoint, String> {
    let (lng, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lng,lat`, got {s:?}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    if !(lng.is_finite() && lat.is_finite()) {
        return Err(format!("non-finite coordinate in {s:?}"));
    }
    Ok(GeoPoint::new(lng, lat))
}
