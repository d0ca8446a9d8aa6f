//! Rayon-backed batch and surface evaluation.

use rayon::prelude::*;

use super::aggregate::{check_observer, face_total, SurfaceReport};
use crate::error::SolidAngleError;
use crate::triangle::solid_angle;
use crate::types::{SolidAngleCfg, Surface, Triangle, Vec3};

/// Evaluate many triangles independently; entry `i` equals
/// `triangles[i].solid_angle(p)` exactly.
pub fn solid_angles_batch(triangles: &[Triangle], p: Vec3) -> Vec<Result<f64, SolidAngleError>> {
    triangles
        .par_iter()
        .map(|t| solid_angle(t.a, t.b, t.c, p))
        .collect()
}

/// Parallel `evaluate_surface`: per-face partials on the rayon pool, then one
/// in-order reduction. Small surfaces (`< cfg.par_min_faces`) stay serial.
pub fn evaluate_surface_par(
    surface: &Surface,
    p: Vec3,
    cfg: SolidAngleCfg,
) -> Result<SurfaceReport, SolidAngleError> {
    if surface.len() < cfg.par_min_faces {
        return super::evaluate_surface(surface, p, cfg);
    }
    check_observer(p)?;
    let partials: Vec<Result<f64, SolidAngleError>> = surface
        .faces
        .par_iter()
        .enumerate()
        .map(|(idx, face)| face_total(idx, face, p, |_| {}))
        .collect();
    SurfaceReport::collect(partials, cfg.policy)
}

/// Parallel `total_solid_angle`; equal to the serial total.
pub fn total_solid_angle_par(
    surface: &Surface,
    p: Vec3,
    cfg: SolidAngleCfg,
) -> Result<f64, SolidAngleError> {
    evaluate_surface_par(surface, p, cfg).map(|r| r.total)
}
