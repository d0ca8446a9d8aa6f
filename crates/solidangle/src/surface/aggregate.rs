use crate::error::SolidAngleError;
use crate::triangle::{direction, solid_angle_dirs};
use crate::types::{DegeneratePolicy, Face, SolidAngleCfg, Surface, Vec3};

/// A face excluded under `DegeneratePolicy::SkipFace`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkippedFace {
    pub face: usize,
    pub error: SolidAngleError,
}

/// Total plus per-face breakdown of one surface evaluation.
///
/// Invariants:
/// - `per_face.len()` equals the face count; skipped faces hold `0.0`.
/// - `total` is the in-order sum of `per_face`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceReport {
    pub total: f64,
    pub per_face: Vec<f64>,
    pub skipped: Vec<SkippedFace>,
}

impl SurfaceReport {
    /// Fold per-face outcomes (in face order) under `policy`.
    pub(super) fn collect(
        outcomes: impl IntoIterator<Item = Result<f64, SolidAngleError>>,
        policy: DegeneratePolicy,
    ) -> Result<Self, SolidAngleError> {
        let mut report = SurfaceReport::default();
        for (idx, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(w) => {
                    report.total += w;
                    report.per_face.push(w);
                }
                Err(error) => {
                    admit(error, policy)?;
                    report.per_face.push(0.0);
                    report.skipped.push(SkippedFace { face: idx, error });
                }
            }
        }
        tracing::debug!(
            faces = report.per_face.len(),
            skipped = report.skipped.len(),
            total = report.total,
            "surface solid angle"
        );
        Ok(report)
    }
}

/// Apply the policy to a face error: propagate, or warn and continue.
fn admit(error: SolidAngleError, policy: DegeneratePolicy) -> Result<(), SolidAngleError> {
    match policy {
        DegeneratePolicy::Strict => Err(error),
        DegeneratePolicy::SkipFace => {
            tracing::warn!(face = ?error.face(), %error, "skipping face");
            Ok(())
        }
    }
}

pub(super) fn check_observer(p: Vec3) -> Result<(), SolidAngleError> {
    if p.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(SolidAngleError::NonFiniteObserver)
    }
}

/// Unit directions from `p` to every vertex of face `idx`.
fn face_directions(idx: usize, face: &Face, p: Vec3) -> Result<Vec<Vec3>, SolidAngleError> {
    if face.len() < 3 {
        return Err(SolidAngleError::InvalidFace {
            face: idx,
            len: face.len(),
        });
    }
    face.vertices
        .iter()
        .enumerate()
        .map(|(i, &v)| direction(v, p, i).map_err(|e| e.with_face(idx)))
        .collect()
}

/// Signed solid angle of face `idx`; `each` sees every fan-triangle value.
///
/// Fails before `each` is called if any vertex is unusable.
pub(super) fn face_total(
    idx: usize,
    face: &Face,
    p: Vec3,
    mut each: impl FnMut(f64),
) -> Result<f64, SolidAngleError> {
    let dirs = face_directions(idx, face, p)?;
    let mut acc = 0.0;
    for i in 1..dirs.len() - 1 {
        let w = solid_angle_dirs(dirs[0], dirs[i], dirs[i + 1]);
        each(w);
        acc += w;
    }
    Ok(acc)
}

/// Signed solid angle of a single face (errors report face index 0).
pub fn face_solid_angle(face: &Face, p: Vec3) -> Result<f64, SolidAngleError> {
    check_observer(p)?;
    face_total(0, face, p, |_| {})
}

/// Signed total over all faces.
///
/// For a closed, outward-wound surface this is 4π from an enclosed point and
/// 0 from an exterior point (up to rounding).
pub fn total_solid_angle(
    surface: &Surface,
    p: Vec3,
    cfg: SolidAngleCfg,
) -> Result<f64, SolidAngleError> {
    evaluate_surface(surface, p, cfg).map(|r| r.total)
}

/// Total, per-face values, and skipped faces.
pub fn evaluate_surface(
    surface: &Surface,
    p: Vec3,
    cfg: SolidAngleCfg,
) -> Result<SurfaceReport, SolidAngleError> {
    check_observer(p)?;
    SurfaceReport::collect(
        surface
            .faces
            .iter()
            .enumerate()
            .map(|(idx, face)| face_total(idx, face, p, |_| {})),
        cfg.policy,
    )
}

/// Per-triangle signed values in fan order, faces in order.
///
/// Skipped faces contribute one `0.0` per fan triangle (none for faces with
/// fewer than three vertices).
pub fn per_triangle_solid_angles(
    surface: &Surface,
    p: Vec3,
    cfg: SolidAngleCfg,
) -> Result<Vec<f64>, SolidAngleError> {
    check_observer(p)?;
    let mut out = Vec::with_capacity(surface.triangle_count());
    for (idx, face) in surface.faces.iter().enumerate() {
        if let Err(error) = face_total(idx, face, p, |w| out.push(w)) {
            admit(error, cfg.policy)?;
            out.extend(std::iter::repeat(0.0).take(face.fan_len()));
        }
    }
    Ok(out)
}
