use nalgebra::Vector3;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use solidangle::{Face, SolidAngleError, Surface, Vec3};

pub type PyVec3 = (f64, f64, f64);

#[inline]
pub fn vec3(v: PyVec3) -> Vec3 {
    Vector3::new(v.0, v.1, v.2)
}

pub fn surface_from_py(faces: Vec<Vec<PyVec3>>) -> Surface {
    Surface::new(
        faces
            .into_iter()
            .map(|f| Face::new(f.into_iter().map(vec3).collect()))
            .collect(),
    )
}

pub fn map_solid_angle_err(err: SolidAngleError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
