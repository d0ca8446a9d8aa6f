//! Value types: triangles, planar faces, surfaces, and the evaluation config.
//!
//! - `Vec3`: `nalgebra::Vector3<f64>`, used for both points and directions.
//! - `Triangle`: ordered vertex triple; order defines orientation.
//! - `Face`: ordered planar polygon (≥3 vertices), fan-triangulated from vertex 0.
//! - `Surface`: unordered collection of faces.
//! - `SolidAngleCfg`: degenerate-vertex policy and parallel threshold.
//!
//! All types are transient values; nothing here caches derived data.

use nalgebra::Vector3;

use crate::cfg::PAR_MIN_FACES;

pub type Vec3 = Vector3<f64>;

/// Ordered vertex triple in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    #[inline]
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }
    /// Same triangle, opposite winding.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            a: self.a,
            b: self.c,
            c: self.b,
        }
    }
}

/// Planar simple polygon with ordered vertices.
///
/// Invariants:
/// - Fewer than three vertices is representable but rejected at evaluation
///   time (`SolidAngleError::InvalidFace`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    pub vertices: Vec<Vec3>,
}

impl Face {
    #[inline]
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self { vertices }
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    /// Fan triangles `(v0, v_i, v_{i+1})` for `i = 1..n-1`; empty for n < 3.
    pub fn fan(&self) -> impl Iterator<Item = Triangle> + '_ {
        let v = &self.vertices;
        (1..v.len().saturating_sub(1)).map(move |i| Triangle::new(v[0], v[i], v[i + 1]))
    }
    #[inline]
    pub fn fan_len(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }
    /// Same polygon, opposite winding (keeps vertex 0 as fan anchor).
    pub fn reversed(&self) -> Self {
        let mut vertices = Vec::with_capacity(self.vertices.len());
        if let Some((&first, rest)) = self.vertices.split_first() {
            vertices.push(first);
            vertices.extend(rest.iter().rev());
        }
        Self { vertices }
    }
}

impl From<Triangle> for Face {
    fn from(t: Triangle) -> Self {
        Face::new(vec![t.a, t.b, t.c])
    }
}

/// Collection of faces whose subtended solid angle is sought.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    pub faces: Vec<Face>,
}

impl Surface {
    #[inline]
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }
    pub fn from_triangles(tris: impl IntoIterator<Item = Triangle>) -> Self {
        Self {
            faces: tris.into_iter().map(Face::from).collect(),
        }
    }
    /// Build from an indexed mesh (`positions` + per-face index lists).
    ///
    /// Returns `None` if any index is out of range.
    pub fn from_indexed(positions: &[Vec3], faces: &[Vec<usize>]) -> Option<Self> {
        let mut out = Vec::with_capacity(faces.len());
        for idx in faces {
            let verts = idx
                .iter()
                .map(|&i| positions.get(i).copied())
                .collect::<Option<Vec<_>>>()?;
            out.push(Face::new(verts));
        }
        Some(Self { faces: out })
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(Face::fan_len).sum()
    }
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().flat_map(Face::fan)
    }
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            faces: self
                .faces
                .iter()
                .map(|f| Face::new(f.vertices.iter().map(|&v| v + offset).collect()))
                .collect(),
        }
    }
    /// Flip the winding of every face.
    pub fn reversed(&self) -> Self {
        Self {
            faces: self.faces.iter().map(Face::reversed).collect(),
        }
    }
}

/// What to do with a face that has no defined contribution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Propagate the first error (face order).
    #[default]
    Strict,
    /// Record the face as skipped, contribute 0, and warn.
    SkipFace,
}

/// Evaluation configuration.
#[derive(Clone, Copy, Debug)]
pub struct SolidAngleCfg {
    pub policy: DegeneratePolicy,
    /// Below this face count `total_solid_angle_par` runs serially.
    pub par_min_faces: usize,
}

impl Default for SolidAngleCfg {
    fn default() -> Self {
        Self {
            policy: DegeneratePolicy::Strict,
            par_min_faces: PAR_MIN_FACES,
        }
    }
}

impl SolidAngleCfg {
    #[inline]
    pub fn strict() -> Self {
        Self::default()
    }
    #[inline]
    pub fn tolerant() -> Self {
        Self {
            policy: DegeneratePolicy::SkipFace,
            ..Self::default()
        }
    }
}
