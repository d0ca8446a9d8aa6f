//! Surface loading for the CLI (JSON face lists, CSV vertex tables).
//!
//! Formats
//! - `.json`: `{"faces": [[[x, y, z], ...], ...]}`, vertices in winding order,
//!   or the indexed form `{"positions": [[x, y, z], ...], "indices": [[i, j, k, ...], ...]}`.
//!   A file may carry both; indexed faces follow the explicit ones.
//! - `.csv`: columns `face,x,y,z`; consecutive rows with the same `face` value
//!   form one face, in winding order.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use solidangle::{Face, Surface, Vec3};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MeshFile {
    #[serde(default)]
    pub faces: Vec<Vec<[f64; 3]>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<Vec<usize>>,
}

fn vec3([x, y, z]: [f64; 3]) -> Vec3 {
    Vec3::new(x, y, z)
}

impl MeshFile {
    pub fn into_surface(self) -> Result<Surface> {
        let mut faces: Vec<Face> = self
            .faces
            .into_iter()
            .map(|f| Face::new(f.into_iter().map(vec3).collect()))
            .collect();
        if !self.indices.is_empty() {
            let positions: Vec<Vec3> = self.positions.into_iter().map(vec3).collect();
            let Some(indexed) = Surface::from_indexed(&positions, &self.indices) else {
                bail!("face index out of range ({} positions)", positions.len());
            };
            faces.extend(indexed.faces);
        }
        Ok(Surface::new(faces))
    }

    pub fn from_surface(surface: &Surface) -> Self {
        Self {
            faces: surface
                .faces
                .iter()
                .map(|f| f.vertices.iter().map(|v| [v.x, v.y, v.z]).collect())
                .collect(),
            ..Self::default()
        }
    }
}

pub fn load_surface(path: &Path) -> Result<Surface> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => bail!("unsupported mesh format: {}", path.display()),
    }
}

fn load_json(path: &Path) -> Result<Surface> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mesh: MeshFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing mesh JSON {}", path.display()))?;
    mesh.into_surface()
        .with_context(|| format!("building surface from {}", path.display()))
}

fn load_csv(path: &Path) -> Result<Surface> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading vertex table {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "vertex_table_shape");
    let face_ids = df.column("face")?.cast(&DataType::Int64)?;
    let face_ids = face_ids.i64()?;
    let mut coords = Vec::with_capacity(3);
    for name in ["x", "y", "z"] {
        coords.push(df.column(name)?.cast(&DataType::Float64)?);
    }
    let (xs, ys, zs) = (coords[0].f64()?, coords[1].f64()?, coords[2].f64()?);

    let mut faces: Vec<Face> = Vec::new();
    let mut current: Option<i64> = None;
    for (row, (((id, x), y), z)) in face_ids
        .into_iter()
        .zip(xs.into_iter())
        .zip(ys.into_iter())
        .zip(zs.into_iter())
        .enumerate()
    {
        let (Some(id), Some(x), Some(y), Some(z)) = (id, x, y, z) else {
            bail!("row {row}: missing value in {}", path.display());
        };
        if current != Some(id) {
            faces.push(Face::default());
            current = Some(id);
        }
        if let Some(face) = faces.last_mut() {
            face.vertices.push(Vec3::new(x, y, z));
        }
    }
    Ok(Surface::new(faces))
}
