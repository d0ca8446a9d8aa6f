//! Closed, outward-wound meshes used in tests, benchmarks, and the CLI.
//!
//! Purpose
//! - Canonical surfaces whose solid angle is known analytically: 4π from any
//!   enclosed point, 0 from any exterior point.
//! - All constructors are centred at the origin; use `Surface::translated`.
//!
//! Conventions
//! - Faces are counterclockwise seen from outside (outward normal by the
//!   right-hand rule).

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::types::{Face, Surface, Triangle, Vec3};

/// Indexed triangle mesh: shared positions plus vertex-index triples.
#[derive(Clone, Debug, Default)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[usize; 3]>,
}

impl TriMesh {
    pub fn to_surface(&self) -> Surface {
        Surface::from_triangles(self.triangles.iter().map(|&[a, b, c]| {
            Triangle::new(self.positions[a], self.positions[b], self.positions[c])
        }))
    }
}

/// Unit icosahedron refined `subdivisions` times by edge midpoints.
///
/// Triangle count is `20 · 4^subdivisions`; vertices lie on the unit sphere.
pub fn icosphere_mesh(subdivisions: u32) -> TriMesh {
    let t = (1.0 + 5f64.sqrt()) / 2.0;
    let raw = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    let positions: Vec<Vec3> = raw
        .iter()
        .map(|&[x, y, z]| Vec3::new(x, y, z).normalize())
        .collect();
    let triangles = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    let mut mesh = TriMesh {
        positions,
        triangles,
    };
    for _ in 0..subdivisions {
        mesh = subdivide(&mesh);
    }
    mesh
}

fn subdivide(mesh: &TriMesh) -> TriMesh {
    let mut positions = mesh.positions.clone();
    let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
    let mut mid = |i: usize, j: usize, positions: &mut Vec<Vec3>| -> usize {
        let key = (i.min(j), i.max(j));
        *midpoints.entry(key).or_insert_with(|| {
            let m = (positions[i] + positions[j]).normalize();
            positions.push(m);
            positions.len() - 1
        })
    };
    let mut triangles = Vec::with_capacity(mesh.triangles.len() * 4);
    for &[a, b, c] in &mesh.triangles {
        let ab = mid(a, b, &mut positions);
        let bc = mid(b, c, &mut positions);
        let ca = mid(c, a, &mut positions);
        triangles.push([a, ab, ca]);
        triangles.push([b, bc, ab]);
        triangles.push([c, ca, bc]);
        triangles.push([ab, bc, ca]);
    }
    TriMesh {
        positions,
        triangles,
    }
}

/// Icosphere of the given radius as a triangle-only surface.
pub fn icosphere(subdivisions: u32, radius: f64) -> Surface {
    let mut mesh = icosphere_mesh(subdivisions);
    for p in mesh.positions.iter_mut() {
        *p *= radius;
    }
    mesh.to_surface()
}

/// Latitude/longitude sphere: triangle caps at the poles, planar quads between.
///
/// Face count is `stacks · slices`; `stacks >= 2`, `slices >= 3` (clamped).
pub fn uv_sphere(stacks: usize, slices: usize, radius: f64) -> Surface {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let top = Vec3::new(0.0, 0.0, radius);
    let bottom = Vec3::new(0.0, 0.0, -radius);
    let rings: Vec<Vec<Vec3>> = (1..stacks)
        .map(|k| {
            let theta = PI * k as f64 / stacks as f64;
            (0..slices)
                .map(|j| {
                    let phi = 2.0 * PI * j as f64 / slices as f64;
                    Vec3::new(
                        theta.sin() * phi.cos(),
                        theta.sin() * phi.sin(),
                        theta.cos(),
                    ) * radius
                })
                .collect()
        })
        .collect();
    let last = rings.len() - 1;
    let mut faces = Vec::with_capacity(stacks * slices);
    for j in 0..slices {
        let jn = (j + 1) % slices;
        faces.push(Face::new(vec![top, rings[0][j], rings[0][jn]]));
        for k in 0..last {
            faces.push(Face::new(vec![
                rings[k][j],
                rings[k + 1][j],
                rings[k + 1][jn],
                rings[k][jn],
            ]));
        }
        faces.push(Face::new(vec![bottom, rings[last][jn], rings[last][j]]));
    }
    Surface::new(faces)
}

/// Axis-aligned cube `[-half, half]³` as six quads.
pub fn cube(half: f64) -> Surface {
    // Corner index = 4·ix + 2·iy + iz with coordinate ±half.
    let corner = |i: usize| {
        let s = |bit: usize| if i & bit != 0 { half } else { -half };
        Vec3::new(s(4), s(2), s(1))
    };
    let quads: [[usize; 4]; 6] = [
        [0, 1, 3, 2], // -x
        [4, 6, 7, 5], // +x
        [0, 4, 5, 1], // -y
        [2, 3, 7, 6], // +y
        [0, 2, 6, 4], // -z
        [1, 5, 7, 3], // +z
    ];
    Surface::new(
        quads
            .iter()
            .map(|q| Face::new(q.iter().map(|&i| corner(i)).collect()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outward(f: &Face) -> bool {
        let v = &f.vertices;
        let n = (v[1] - v[0]).cross(&(v[2] - v[0]));
        n.dot(&v[0]) > 0.0
    }

    #[test]
    fn icosphere_counts_and_radius() {
        for k in 0..3 {
            let m = icosphere_mesh(k);
            assert_eq!(m.triangles.len(), 20 * 4usize.pow(k));
            // Euler: V - E + F = 2 with E = 3F/2.
            assert_eq!(m.positions.len(), 2 + m.triangles.len() / 2);
            assert!(m.positions.iter().all(|p| (p.norm() - 1.0).abs() < 1e-12));
        }
        let s = icosphere(1, 2.5);
        assert!(s
            .faces
            .iter()
            .all(|f| f.vertices.iter().all(|p| (p.norm() - 2.5).abs() < 1e-12)));
    }

    #[test]
    fn fixtures_are_outward_wound() {
        assert!(icosphere(2, 1.0).faces.iter().all(outward));
        assert!(uv_sphere(6, 10, 1.0).faces.iter().all(outward));
        assert!(cube(1.0).faces.iter().all(outward));
    }

    #[test]
    fn uv_sphere_mixes_triangles_and_quads() {
        let s = uv_sphere(4, 8, 1.0);
        assert_eq!(s.len(), 32);
        assert_eq!(s.faces.iter().filter(|f| f.len() == 3).count(), 16);
        assert_eq!(s.faces.iter().filter(|f| f.len() == 4).count(), 16);
        assert_eq!(s.triangle_count(), 16 + 2 * 16);
    }
}
