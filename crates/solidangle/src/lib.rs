//! Solid angle subtended by triangulated surfaces.
//!
//! Layout
//! - `triangle`: single spherical triangle (half-angle-tangent excess, signed).
//! - `surface`: fan triangulation, translation, and signed accumulation over
//!   faces; serial and rayon paths with a shared degenerate-face policy.
//! - `approx`: first-order configuration-factor estimate for comparison.
//! - `special`, `rand`: closed outward-wound fixtures (spheres, cube, jittered
//!   star surfaces).
//!
//! Everything is pure and stateless; each call is independent.

pub mod approx;
pub mod cfg;
mod error;
pub mod rand;
pub mod special;
pub mod surface;
pub mod triangle;
mod types;

pub use error::SolidAngleError;
pub use surface::{
    evaluate_surface, evaluate_surface_par, face_solid_angle, per_triangle_solid_angles,
    solid_angles_batch, total_solid_angle, total_solid_angle_par, SkippedFace, SurfaceReport,
};
pub use triangle::{solid_angle, solid_angle_dirs, spherical_excess};
pub use types::{DegeneratePolicy, Face, SolidAngleCfg, Surface, Triangle, Vec3};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Steradians in a full sphere.
pub const FULL_SPHERE: f64 = 4.0 * std::f64::consts::PI;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::approx::approx_total_solid_angle;
    pub use crate::special::{cube, icosphere, uv_sphere};
    pub use crate::surface::{evaluate_surface, total_solid_angle, total_solid_angle_par};
    pub use crate::triangle::solid_angle;
    pub use crate::{
        DegeneratePolicy, Face, SolidAngleCfg, SolidAngleError, Surface, Triangle, Vec3,
        FULL_SPHERE,
    };
}
