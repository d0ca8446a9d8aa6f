//! First-order configuration-factor estimate of the subtended solid angle.
//!
//! Each face is treated as a flat patch seen from the observation point:
//! `ω_f ≈ max(cos θ, 0) · A / d²`, with `d` the distance to the face centroid,
//! `A` the face area, and `θ` the angle between the outward normal and the
//! direction from the observation point to the centroid. Back-facing patches
//! contribute nothing, so from an exterior point the estimate is the projected
//! front, not 0.
//!
//! The estimate converges to the exact value as patches shrink relative to
//! their distance; it exists for comparison against `surface::total_solid_angle`.

use crate::cfg::AREA_EPS;
use crate::error::SolidAngleError;
use crate::types::{Face, Surface, Vec3};

/// Vector area `½ Σ (vᵢ − v₀) × (vᵢ₊₁ − v₀)` (Newell); its norm is the
/// polygon area. Offsets from `v₀` keep the sum independent of where the face
/// sits in space.
pub fn vector_area(face: &Face) -> Vec3 {
    let Some(&v0) = face.vertices.first() else {
        return Vec3::zeros();
    };
    let mut acc = Vec3::zeros();
    for pair in face.vertices[1..].windows(2) {
        acc += (pair[0] - v0).cross(&(pair[1] - v0));
    }
    acc * 0.5
}

#[inline]
pub fn face_area(face: &Face) -> f64 {
    vector_area(face).norm()
}

/// Largest squared edge length, closing edge included.
fn max_edge_squared(face: &Face) -> f64 {
    let v = &face.vertices;
    let n = v.len();
    (0..n)
        .map(|i| (v[(i + 1) % n] - v[i]).norm_squared())
        .fold(0.0, f64::max)
}

/// Unit outward normal, `None` for zero-area faces.
///
/// The area is compared against the face's own squared extent, so the test
/// does not change under translation.
pub fn face_normal(face: &Face) -> Option<Vec3> {
    let n = vector_area(face);
    let norm = n.norm();
    if norm <= AREA_EPS * max_edge_squared(face).max(f64::MIN_POSITIVE) {
        return None;
    }
    Some(n / norm)
}

/// Vertex mean; `None` for an empty face.
pub fn face_centroid(face: &Face) -> Option<Vec3> {
    let &v0 = face.vertices.first()?;
    let offset: Vec3 = face.vertices.iter().map(|v| v - v0).sum();
    Some(v0 + offset / face.vertices.len() as f64)
}

/// Configuration factor of a flat patch seen from `point`.
///
/// A patch centred on the point contributes 0.
pub fn config_factor(patch_position: Vec3, patch_normal: Vec3, point: Vec3, area: f64) -> f64 {
    let to_patch = patch_position - point;
    let distance = to_patch.norm();
    if distance == 0.0 {
        return 0.0;
    }
    let cos_theta = patch_normal.dot(&to_patch) / distance;
    cos_theta.max(0.0) * area / (distance * distance)
}

/// Sum of per-face configuration factors.
///
/// Errors
/// - `InvalidFace` for faces with fewer than three vertices. Zero-area faces
///   contribute 0.
pub fn approx_total_solid_angle(surface: &Surface, point: Vec3) -> Result<f64, SolidAngleError> {
    let mut total = 0.0;
    for (idx, face) in surface.faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(SolidAngleError::InvalidFace {
                face: idx,
                len: face.len(),
            });
        }
        let (Some(normal), Some(centroid)) = (face_normal(face), face_centroid(face)) else {
            continue;
        };
        total += config_factor(centroid, normal, point, face_area(face));
    }
    Ok(total)
}
