//! Run record written next to each `run` result.
//!
//! `<stem>.run.json` captures what was evaluated (input file, point, policy)
//! and a summary of the outcome, so a result file can be checked without
//! re-running the evaluation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use solidangle::{DegeneratePolicy, Surface, SurfaceReport, Vec3};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    pub solidangle_version: String,
    pub input: String,
    pub input_bytes: u64,
    pub point: [f64; 3],
    pub policy: String,
    pub parallel: bool,
    pub faces: usize,
    pub triangles: usize,
    pub total: f64,
    pub approx_total: Option<f64>,
    pub skipped_faces: Vec<usize>,
    pub result: String,
}

impl RunRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input: &Path,
        surface: &Surface,
        point: Vec3,
        policy: DegeneratePolicy,
        parallel: bool,
        report: &SurfaceReport,
        approx_total: Option<f64>,
        result: &Path,
    ) -> Self {
        Self {
            solidangle_version: solidangle::VERSION.to_string(),
            input: input.to_string_lossy().into_owned(),
            input_bytes: fs::metadata(input).map(|m| m.len()).unwrap_or(0),
            point: [point.x, point.y, point.z],
            policy: match policy {
                DegeneratePolicy::Strict => "strict",
                DegeneratePolicy::SkipFace => "skip_face",
            }
            .to_string(),
            parallel,
            faces: surface.len(),
            triangles: surface.triangle_count(),
            total: report.total,
            approx_total,
            skipped_faces: report.skipped.iter().map(|s| s.face).collect(),
            result: result.to_string_lossy().into_owned(),
        }
    }

    /// Write the record beside `result` and return its path.
    pub fn write_beside(&self, result: &Path) -> Result<PathBuf> {
        let path = record_path(result);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `out/result.json` -> `out/result.run.json`.
pub fn record_path(result: &Path) -> PathBuf {
    let mut name = result
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "result".into());
    name.push(".run.json");
    result.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidangle::special::cube;
    use solidangle::{evaluate_surface, SolidAngleCfg};
    use tempfile::tempdir;

    #[test]
    fn record_path_replaces_extension() {
        assert_eq!(
            record_path(Path::new("/tmp/out/cube.json")),
            Path::new("/tmp/out/cube.run.json")
        );
        assert_eq!(record_path(Path::new("bare")), Path::new("bare.run.json"));
    }

    #[test]
    fn record_summarises_tolerant_run() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cube.json");
        fs::write(&input, "{}").unwrap();
        let result = dir.path().join("cube-result.json");
        let surface = cube(1.0);
        let corner = Vec3::new(1.0, 1.0, 1.0);
        let report = evaluate_surface(&surface, corner, SolidAngleCfg::tolerant()).unwrap();
        let rec = RunRecord::new(
            &input,
            &surface,
            corner,
            DegeneratePolicy::SkipFace,
            false,
            &report,
            None,
            &result,
        );
        assert_eq!(rec.input_bytes, 2);
        assert_eq!(rec.policy, "skip_face");
        assert_eq!(rec.skipped_faces, vec![1, 3, 5]);
        assert_eq!(rec.triangles, 12);

        let path = rec.write_beside(&result).unwrap();
        assert_eq!(path, dir.path().join("cube-result.run.json"));
        let back: RunRecord = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(back.skipped_faces, rec.skipped_faces);
        assert_eq!(back.result, result.to_string_lossy());
        assert!((back.total - rec.total).abs() < 1e-12);
    }
}
