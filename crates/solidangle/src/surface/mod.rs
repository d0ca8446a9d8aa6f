//! Surface aggregation: fan-triangulate faces and sum signed triangle values.
//!
//! Purpose
//! - Turn a `Surface` plus observation point into a total solid angle, a
//!   per-face breakdown, or a per-triangle array.
//! - Apply the degenerate-face policy (`Strict` propagates, `SkipFace`
//!   records and warns) identically on the serial and parallel paths.
//!
//! Conventions
//! - Faces are evaluated in order; within a face, directions are computed once
//!   per vertex and every fan triangle goes through `solid_angle_dirs`, so each
//!   triangle value is bit-identical to a direct `triangle::solid_angle` call.
//! - Per-face partial sums are reduced in face order on both paths, so
//!   serial and parallel totals agree exactly.

mod aggregate;
mod par;

pub use aggregate::{
    evaluate_surface, face_solid_angle, per_triangle_solid_angles, total_solid_angle,
    SkippedFace, SurfaceReport,
};
pub use par::{evaluate_surface_par, solid_angles_batch, total_solid_angle_par};
