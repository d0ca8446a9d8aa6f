//! Exact vs configuration-factor totals on refined icospheres.
//!
//! Prints, per refinement level, the triangle count and the absolute error of
//! both methods against 4π from the centre, plus the exact total from an
//! exterior point (expected 0).

use std::time::Instant;

use nalgebra::Vector3;
use solidangle::approx::approx_total_solid_angle;
use solidangle::special::icosphere;
use solidangle::{total_solid_angle_par, SolidAngleCfg, FULL_SPHERE};

fn main() {
    let cfg = SolidAngleCfg::default();
    let center = Vector3::zeros();
    let outside = Vector3::new(0.0, 0.0, 5.0);
    for k in 0..7 {
        let s = icosphere(k, 1.0);
        let start = Instant::now();
        let exact = total_solid_angle_par(&s, center, cfg).expect("closed mesh evaluates");
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
        let approx = approx_total_solid_angle(&s, center).expect("closed mesh evaluates");
        let ext = total_solid_angle_par(&s, outside, cfg).expect("closed mesh evaluates");
        println!(
            "subdiv={k} triangles={} exact_err={:.3e} approx_err={:.3e} exterior={:.3e} time_ms={elapsed_ms:.3}",
            s.triangle_count(),
            (exact - FULL_SPHERE).abs(),
            (approx - FULL_SPHERE).abs(),
            ext,
        );
    }
}
