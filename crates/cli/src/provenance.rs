//! Sidecar recording how a `measure` output was produced.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// GeoJSON file a measurement was taken from.
#[derive(Debug, Serialize)]
pub struct InputRecord {
    pub path: String,
    pub bytes: usize,
    /// CRC-32 of the raw file contents, lowercase hex.
    pub crc32: String,
}

impl InputRecord {
    pub fn new(path: &Path, contents: &[u8]) -> Self {
        Self {
            path: path.display().to_string(),
            bytes: contents.len(),
            crc32: format!("{:08x}", crc32fast::hash(contents)),
        }
    }
}

/// Contents of `<output stem>.provenance.json`.
#[derive(Debug, Serialize)]
pub struct MeasureProvenance {
    pub code_rev: String,
    pub version: &'static str,
    pub input: InputRecord,
    pub polygon_index: usize,
    pub vertices: usize,
    pub earth_radius: f64,
    pub output: String,
}

impl MeasureProvenance {
    pub fn new(
        input: InputRecord,
        polygon_index: usize,
        vertices: usize,
        earth_radius: f64,
        output: &Path,
    ) -> Self {
        Self {
            code_rev: code_rev(),
            version: geopoly::VERSION,
            input,
            polygon_index,
            vertices,
            earth_radius,
            output: output.display().to_string(),
        }
    }

    /// Write next to the output file; returns the sidecar path.
    pub fn write(&self) -> Result<PathBuf> {
        let path = sidecar_path(Path::new(&self.output));
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn sidecar_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "measure".to_string());
    output.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` baked in at build time, else read at run time, else "unknown".
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
