use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use solidangle::approx::{approx_total_solid_angle, face_centroid, face_normal};
use solidangle::cfg::CLOSURE_EPS;
use solidangle::special::icosphere;
use solidangle::{
    evaluate_surface, evaluate_surface_par, DegeneratePolicy, SolidAngleCfg, Surface,
    SurfaceReport, Vec3, FULL_SPHERE,
};

mod mesh;
mod record;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Solid angle subtended by triangulated surfaces")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate a mesh file (.json or .csv) from one observation point
    Run {
        #[arg(long)]
        input: PathBuf,
        /// Observation point as `x,y,z`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        point: Vec3,
        /// Skip faces with no defined contribution instead of failing
        #[arg(long)]
        tolerant: bool,
        /// Evaluate faces on the rayon pool
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Compare exact and approximate totals on an icosphere against the analytic value
    ///
    /// The analytic value is 4π inside the mesh's inradius and 0 outside
    /// `radius`; between the two it is reported as null.
    Sphere {
        #[arg(long, default_value_t = 3)]
        subdivisions: u32,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true, default_value = "0,0,0")]
        point: Vec3,
    },
    /// Print the library version and closure tolerance
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            point,
            tolerant,
            parallel,
            out,
        } => run(&input, point, tolerant, parallel, &out),
        Action::Sphere {
            subdivisions,
            radius,
            point,
        } => sphere(subdivisions, radius, point),
        Action::Report => report(),
    }
}

fn parse_point(s: &str) -> Result<Vec3, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid coordinate in {s:?}: {e}"))?;
    match parts.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got {} values", parts.len())),
    }
}

#[derive(Serialize)]
struct SkippedOut {
    face: usize,
    error: String,
}

#[derive(Serialize)]
struct RunOutput {
    point: [f64; 3],
    faces: usize,
    triangles: usize,
    total: f64,
    approx_total: Option<f64>,
    per_face: Vec<f64>,
    skipped: Vec<SkippedOut>,
}

impl RunOutput {
    fn new(surface: &Surface, point: Vec3, report: SurfaceReport, approx_total: Option<f64>) -> Self {
        Self {
            point: [point.x, point.y, point.z],
            faces: surface.len(),
            triangles: surface.triangle_count(),
            total: report.total,
            approx_total,
            per_face: report.per_face,
            skipped: report
                .skipped
                .into_iter()
                .map(|s| SkippedOut {
                    face: s.face,
                    error: s.error.to_string(),
                })
                .collect(),
        }
    }
}

fn run(input: &Path, point: Vec3, tolerant: bool, parallel: bool, out: &Path) -> Result<()> {
    tracing::info!(input = %input.display(), ?point, tolerant, parallel, "run");
    let surface = mesh::load_surface(input)?;
    let policy = if tolerant {
        DegeneratePolicy::SkipFace
    } else {
        DegeneratePolicy::Strict
    };
    let cfg = SolidAngleCfg {
        policy,
        ..SolidAngleCfg::default()
    };
    let report = if parallel {
        evaluate_surface_par(&surface, point, cfg)
    } else {
        evaluate_surface(&surface, point, cfg)
    }
    .with_context(|| format!("evaluating {}", input.display()))?;
    // The estimate is informational; a malformed face already surfaced above
    // under the strict policy.
    let approx_total = approx_total_solid_angle(&surface, point).ok();
    tracing::info!(total = report.total, skipped = report.skipped.len(), "evaluated");

    let record = record::RunRecord::new(
        input,
        &surface,
        point,
        policy,
        parallel,
        &report,
        approx_total,
        out,
    );
    let output = RunOutput::new(&surface, point, report, approx_total);
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&output)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let record_path = record.write_beside(out)?;
    tracing::info!(result = %out.display(), record = %record_path.display(), "written");
    Ok(())
}

/// Smallest distance from the origin to a face plane of an origin-centred
/// convex surface.
fn inradius(surface: &Surface) -> f64 {
    surface
        .faces
        .iter()
        .filter_map(|f| Some(face_normal(f)?.dot(&face_centroid(f)?)))
        .fold(f64::INFINITY, f64::min)
}

/// 4π strictly inside the inradius, 0 outside the circumradius, `None` in
/// the shell between them where the answer depends on the facets.
fn analytic_value(surface: &Surface, circumradius: f64, point: Vec3) -> Option<f64> {
    let r = point.norm();
    if r < inradius(surface) {
        Some(FULL_SPHERE)
    } else if r > circumradius {
        Some(0.0)
    } else {
        None
    }
}

fn sphere(subdivisions: u32, radius: f64, point: Vec3) -> Result<()> {
    let surface = icosphere(subdivisions, radius);
    let expected = analytic_value(&surface, radius, point);
    if expected.is_none() {
        tracing::warn!(?point, radius, "point lies between inradius and radius");
    }
    let report = evaluate_surface_par(&surface, point, SolidAngleCfg::default())?;
    let approx = approx_total_solid_angle(&surface, point)?;
    tracing::info!(subdivisions, triangles = surface.triangle_count(), "sphere");
    let obj = serde_json::json!({
        "subdivisions": subdivisions,
        "triangles": surface.triangle_count(),
        "radius": radius,
        "point": [point.x, point.y, point.z],
        "analytic": expected,
        "exact": report.total,
        "exact_abs_err": expected.map(|e| (report.total - e).abs()),
        "approx": approx,
        "approx_abs_err": expected.map(|e| (approx - e).abs())
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "solidangle_version": solidangle::VERSION,
        "closure_eps": CLOSURE_EPS
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
