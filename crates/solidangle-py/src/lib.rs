//! PyO3 bindings for selected `solidangle` functions.
//!
//! Notes
//! - Keep bindings thin and predictable; inputs are plain tuples/lists so the
//!   mesh loader on the Python side can hand over raw coordinates.

use pyo3::prelude::*;

mod common;
mod geom;

#[pymodule]
fn solidangle_native(_py: Python, m: &PyModule) -> PyResult<()> {
    geom::register(m)?;
    Ok(())
}
