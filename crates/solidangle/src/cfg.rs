//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants; runtime knobs live in `SolidAngleCfg`.

/// Absolute tolerance for closed-surface totals (4π inside, 0 outside).
pub const CLOSURE_EPS: f64 = 1e-6;
/// Face count below which the parallel aggregator stays serial.
pub(crate) const PAR_MIN_FACES: usize = 64;
/// Zero-area threshold of the approximation, relative to squared edge length.
pub(crate) const AREA_EPS: f64 = 1e-15;
