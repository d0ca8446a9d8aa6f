//! Single-triangle solid angle via the half-angle-tangent spherical excess.
//!
//! Purpose
//! - Evaluate the signed solid angle of one spherical triangle as seen from an
//!   observation point, accurately for tiny, near-degenerate, and very close
//!   triangles.
//!
//! Formula
//! - Side angles `a, b, c` from clamped dot products of unit directions.
//! - L'Huilier: `tan(E/4)² = tan(s/2)·tan((s−a)/2)·tan((s−b)/2)·tan((s−c)/2)`,
//!   `s = (a+b+c)/2`. The product is floored at 0 before the square root.
//!   Do not replace this with `(α+β+γ)−π`: the angle sum cancels
//!   catastrophically as the area goes to zero.
//! - Sign: negative iff the triple product `(u1 × u2)·u3 < 0`. Normalisation
//!   is a positive scaling per vector, so the sign equals that of the raw
//!   offsets.
//!
//! Conventions
//! - Counterclockwise as seen from the observation point is positive; an
//!   outward-wound closed surface sums to +4π from any interior point.

use std::f64::consts::PI;

use crate::error::SolidAngleError;
use crate::types::{Triangle, Vec3};

/// Signed solid angle of triangle `(v1, v2, v3)` seen from `p`.
///
/// Errors
/// - `DegenerateVertex` if a vertex equals `p`.
/// - `NonFiniteVertex` / `NonFiniteObserver` for NaN/∞ coordinates.
pub fn solid_angle(v1: Vec3, v2: Vec3, v3: Vec3, p: Vec3) -> Result<f64, SolidAngleError> {
    if !is_finite(&p) {
        return Err(SolidAngleError::NonFiniteObserver);
    }
    let u1 = direction(v1, p, 0)?;
    let u2 = direction(v2, p, 1)?;
    let u3 = direction(v3, p, 2)?;
    Ok(solid_angle_dirs(u1, u2, u3))
}

impl Triangle {
    /// Signed solid angle seen from `p`; see [`solid_angle`].
    #[inline]
    pub fn solid_angle(&self, p: Vec3) -> Result<f64, SolidAngleError> {
        solid_angle(self.a, self.b, self.c, p)
    }
}

/// Signed solid angle of the spherical triangle spanned by unit directions.
///
/// Pre: `u1, u2, u3` are unit length (not checked). Never returns NaN for
/// finite unit inputs.
pub fn solid_angle_dirs(u1: Vec3, u2: Vec3, u3: Vec3) -> f64 {
    let a = clamped_acos(u2.dot(&u3));
    let b = clamped_acos(u1.dot(&u3));
    let c = clamped_acos(u1.dot(&u2));
    let e = spherical_excess(a, b, c);
    if u1.cross(&u2).dot(&u3) < 0.0 {
        -e
    } else {
        e
    }
}

/// Unsigned spherical excess from the three side angles (L'Huilier).
///
/// Returns a value in `[0, 2π]`; a negative radicand from rounding yields 0.
pub fn spherical_excess(a: f64, b: f64, c: f64) -> f64 {
    // Sides of a spherical triangle sum to at most 2π; rounding past it would
    // flip the sign of tan(s/2) for a point in the plane of the triangle.
    let s = (0.5 * (a + b + c)).min(PI);
    let prod = (0.5 * s).tan()
        * (0.5 * (s - a)).tan()
        * (0.5 * (s - b)).tan()
        * (0.5 * (s - c)).tan();
    4.0 * prod.max(0.0).sqrt().atan()
}

#[inline]
fn clamped_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

#[inline]
fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Unit direction from `p` to `v`.
///
/// Scales by the largest component first, so offsets far below
/// `sqrt(f64::MIN_POSITIVE)` still normalise instead of underflowing.
pub(crate) fn direction(v: Vec3, p: Vec3, vertex: usize) -> Result<Vec3, SolidAngleError> {
    if !is_finite(&v) {
        return Err(SolidAngleError::NonFiniteVertex {
            face: None,
            vertex,
        });
    }
    let r = v - p;
    let scale = r.amax();
    if !scale.is_finite() {
        // v and p finite but far apart enough to overflow the difference.
        return Err(SolidAngleError::NonFiniteVertex {
            face: None,
            vertex,
        });
    }
    if scale == 0.0 {
        return Err(SolidAngleError::DegenerateVertex {
            face: None,
            vertex,
        });
    }
    let r = r / scale;
    Ok(r / r.norm())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-12;

    fn origin() -> Vec3 {
        Vec3::zeros()
    }

    #[test]
    fn octant_is_quarter_hemisphere() {
        let w = solid_angle(
            vector![1.0, 0.0, 0.0],
            vector![0.0, 1.0, 0.0],
            vector![0.0, 0.0, 1.0],
            origin(),
        )
        .unwrap();
        assert!((w - FRAC_PI_2).abs() < TOL, "w = {w}");
    }

    #[test]
    fn octant_scaled_and_translated() {
        // Distances to p do not matter, only directions.
        let p = vector![3.0, -2.0, 0.5];
        let w = solid_angle(
            p + vector![7.0, 0.0, 0.0],
            p + vector![0.0, 0.01, 0.0],
            p + vector![0.0, 0.0, 1e5],
            p,
        )
        .unwrap();
        assert!((w - FRAC_PI_2).abs() < 1e-10, "w = {w}");
    }

    #[test]
    fn reversed_winding_negates() {
        let t = Triangle::new(
            vector![1.0, 0.2, 0.3],
            vector![-0.1, 1.0, 0.4],
            vector![0.2, -0.3, 1.5],
        );
        let p = vector![0.1, 0.1, 0.1];
        let w = t.solid_angle(p).unwrap();
        let r = t.reversed().solid_angle(p).unwrap();
        assert!(w != 0.0);
        assert!((w + r).abs() < TOL);
    }

    #[test]
    fn cyclic_rotation_is_invariant() {
        let (a, b, c) = (
            vector![1.0, 0.2, 0.3],
            vector![-0.1, 1.0, 0.4],
            vector![0.2, -0.3, 1.5],
        );
        let p = origin();
        let w0 = solid_angle(a, b, c, p).unwrap();
        let w1 = solid_angle(b, c, a, p).unwrap();
        let w2 = solid_angle(c, a, b, p).unwrap();
        assert!((w0 - w1).abs() < TOL && (w0 - w2).abs() < TOL);
    }

    #[test]
    fn coincident_vertices_give_zero() {
        let a = vector![1.0, 2.0, 3.0];
        let b = vector![-1.0, 0.5, 2.0];
        // u·u may round just below 1, so the zero side is only ~1e-8.
        let w = solid_angle(a, a, b, origin()).unwrap();
        assert!(w.abs() < 1e-6, "w = {w}");
        let w = solid_angle(a, b, b, vector![0.3, 0.0, -1.0]).unwrap();
        assert!(w.abs() < 1e-6, "w = {w}");
    }

    #[test]
    fn collinear_vertices_give_zero() {
        let w = solid_angle(
            vector![1.0, 0.0, 1.0],
            vector![1.0, 1.0, 1.0],
            vector![1.0, 2.0, 1.0],
            origin(),
        )
        .unwrap();
        assert!(!w.is_nan());
        assert!(w.abs() < 1e-6, "w = {w}");
    }

    #[test]
    fn vertex_at_observation_point_is_an_error() {
        let p = vector![0.5, 0.5, 0.5];
        let err = solid_angle(vector![1.0, 0.0, 0.0], p, vector![0.0, 0.0, 1.0], p).unwrap_err();
        assert_eq!(
            err,
            SolidAngleError::DegenerateVertex {
                face: None,
                vertex: 1
            }
        );
    }

    #[test]
    fn tiny_offsets_still_evaluate() {
        // Offsets around 1e-200 underflow a naive squared norm.
        let s = 1e-200;
        let p = origin();
        let w = solid_angle(
            vector![s, 0.0, 0.0],
            vector![0.0, s, 0.0],
            vector![0.0, 0.0, s],
            p,
        )
        .unwrap();
        assert!((w - FRAC_PI_2).abs() < TOL, "w = {w}");
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let err = solid_angle(
            vector![f64::NAN, 0.0, 0.0],
            vector![0.0, 1.0, 0.0],
            vector![0.0, 0.0, 1.0],
            origin(),
        )
        .unwrap_err();
        assert!(matches!(err, SolidAngleError::NonFiniteVertex { vertex: 0, .. }));
        let err = solid_angle(
            vector![1.0, 0.0, 0.0],
            vector![0.0, 1.0, 0.0],
            vector![0.0, 0.0, 1.0],
            vector![0.0, f64::INFINITY, 0.0],
        )
        .unwrap_err();
        assert_eq!(err, SolidAngleError::NonFiniteObserver);
    }

    #[test]
    fn small_triangle_matches_planar_limit() {
        // Far-away triangle of area A facing p: ω ≈ A / d².
        let d = 10.0;
        let h = 1e-2;
        let w = solid_angle(
            vector![0.0, 0.0, d],
            vector![h, 0.0, d],
            vector![0.0, h, d],
            origin(),
        )
        .unwrap();
        let expected = 0.5 * h * h / (d * d);
        assert!(w > 0.0);
        assert!(((w - expected) / expected).abs() < 1e-5, "w = {w:e}");
    }

    #[test]
    fn point_inside_triangle_plane_sees_half_sphere() {
        let w = solid_angle(
            vector![1.0, 0.0, 0.0],
            vector![-0.5, 0.8, 0.0],
            vector![-0.5, -0.8, 0.0],
            origin(),
        )
        .unwrap();
        assert!((w.abs() - 2.0 * PI).abs() < 1e-6, "w = {w}");
    }

    #[test]
    fn excess_of_equilateral_right_triangle() {
        // Sides π/2 each: E = π/2.
        let e = spherical_excess(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2);
        assert!((e - FRAC_PI_2).abs() < TOL);
        // Degenerate side configurations stay finite.
        assert_eq!(spherical_excess(0.0, 0.0, 0.0), 0.0);
        let e = spherical_excess(1.0, 0.5, 0.5 + 1e-17);
        assert!(e.is_finite() && e >= 0.0);
    }

    #[test]
    fn randomized_matches_atan2_form_seeded() {
        // Cross-check against the Van Oosterom–Strackee closed form.
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut rv = || {
                vector![
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0)
                ]
            };
            let (a, b, c) = (rv(), rv(), rv());
            let w = solid_angle(a, b, c, origin()).unwrap();
            let (la, lb, lc) = (a.norm(), b.norm(), c.norm());
            let num = a.cross(&b).dot(&c);
            let den = la * lb * lc + a.dot(&b) * lc + a.dot(&c) * lb + b.dot(&c) * la;
            let expected = 2.0 * num.atan2(den);
            assert!(expected.abs() < 2.0 * PI);
            assert!((w - expected).abs() < 1e-8, "w = {w}, expected = {expected}");
        }
    }
}
