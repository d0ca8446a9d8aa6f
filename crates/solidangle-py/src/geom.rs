//! Solid-angle bindings (kept separate so `lib.rs` stays tiny).

use crate::common::{map_solid_angle_err, surface_from_py, vec3, PyVec3};
use pyo3::prelude::*;
use solidangle::{total_solid_angle_par, SolidAngleCfg};

/// Signed solid angle of triangle (v1, v2, v3) seen from p.
#[pyfunction]
pub fn solid_angle_triangle(v1: PyVec3, v2: PyVec3, v3: PyVec3, p: PyVec3) -> PyResult<f64> {
    solidangle::solid_angle(vec3(v1), vec3(v2), vec3(v3), vec3(p)).map_err(map_solid_angle_err)
}

/// Signed total over planar faces; `strict=False` skips faces with no defined contribution.
#[pyfunction]
#[pyo3(signature = (faces, p, strict = true))]
pub fn total_solid_angle(faces: Vec<Vec<PyVec3>>, p: PyVec3, strict: bool) -> PyResult<f64> {
    let surface = surface_from_py(faces);
    let cfg = if strict {
        SolidAngleCfg::strict()
    } else {
        SolidAngleCfg::tolerant()
    };
    total_solid_angle_par(&surface, vec3(p), cfg).map_err(map_solid_angle_err)
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solid_angle_triangle, m)?)?;
    m.add_function(wrap_pyfunction!(total_solid_angle, m)?)?;
    Ok(())
}
