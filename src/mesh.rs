//! Triangle meshes: vertex positions and faces indexing into them.
//!
//! Meshes are validated when they are built, so the renderer can index
//! vertices without further checks.

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::math::vec3::Vec3;

/// Errors raised while building or loading a [`Mesh`].
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed.
    Obj(tobj::LoadError),
    /// A face refers to a vertex that does not exist.
    IndexOutOfRange {
        face: usize,
        index: usize,
        nverts: usize,
    },
    /// The face index list is not a multiple of three.
    NonTriangularFace { indices: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to load OBJ: {e}"),
            LoadError::IndexOutOfRange {
                face,
                index,
                nverts,
            } => write!(
                f,
                "face {face} refers to vertex {index}, but the mesh has {nverts} vertices"
            ),
            LoadError::NonTriangularFace { indices } => write!(
                f,
                "face index list has {indices} entries, which is not a multiple of 3"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(-0.5, -0.5, 0.5),
];

// Counter-clockwise when seen from outside the cube.
const CUBE_FACES: [[usize; 3]; 12] = [
    // Back (-z)
    [0, 1, 2],
    [0, 2, 3],
    // Right (+x)
    [3, 2, 4],
    [3, 4, 5],
    // Front (+z)
    [5, 4, 6],
    [5, 6, 7],
    // Left (-x)
    [7, 6, 1],
    [7, 1, 0],
    // Top (+y)
    [1, 6, 4],
    [1, 4, 2],
    // Bottom (-y)
    [5, 7, 0],
    [5, 0, 3],
];

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Builds a mesh, rejecting faces that index past the vertex list.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[usize; 3]>) -> Result<Self, LoadError> {
        let nverts = vertices.len();
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= nverts) {
                return Err(LoadError::IndexOutOfRange {
                    face,
                    index,
                    nverts,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// A unit cube centred on the origin, rotated so three faces are visible.
    pub fn cube() -> Self {
        let (sin_y, cos_y) = 0.6_f32.sin_cos();
        let (sin_x, cos_x) = 0.45_f32.sin_cos();
        let vertices = CUBE_VERTICES
            .iter()
            .map(|v| {
                let v = Vec3::new(v.x * cos_y + v.z * sin_y, v.y, -v.x * sin_y + v.z * cos_y);
                Vec3::new(v.x, v.y * cos_x - v.z * sin_x, v.y * sin_x + v.z * cos_x)
            })
            .collect();
        Self {
            vertices,
            faces: CUBE_FACES.to_vec(),
        }
    }

    /// Loads every object in an OBJ file into a single mesh.
    ///
    /// Polygons are triangulated. Each object's indices are offset by the
    /// vertices loaded before it.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for model in models {
            let mesh = model.mesh;
            if mesh.indices.len() % 3 != 0 {
                return Err(LoadError::NonTriangularFace {
                    indices: mesh.indices.len(),
                });
            }
            let offset = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            faces.extend(mesh.indices.chunks_exact(3).map(|f| {
                [
                    offset + f[0] as usize,
                    offset + f[1] as usize,
                    offset + f[2] as usize,
                ]
            }));
            debug!("object '{}': {} faces", model.name, mesh.indices.len() / 3);
        }

        let mesh = Self::new(vertices, faces)?;
        if mesh.nfaces() == 0 {
            warn!("{} contains no faces", path.display());
        }
        info!(
            "loaded {}: {} vertices, {} faces",
            path.display(),
            mesh.nverts(),
            mesh.nfaces()
        );
        Ok(mesh)
    }

    pub fn nverts(&self) -> usize {
        self.vertices.len()
    }

    pub fn nfaces(&self) -> usize {
        self.faces.len()
    }

    /// Vertex indices of face `i`.
    ///
    /// # Panics
    /// Panics if `i >= nfaces()`.
    pub fn face(&self, i: usize) -> [usize; 3] {
        self.faces[i]
    }

    /// Position of vertex `i`.
    ///
    /// # Panics
    /// Panics if `i >= nverts()`.
    pub fn vert(&self, i: usize) -> Vec3 {
        self.vertices[i]
    }

    /// The three corner positions of face `i`.
    pub fn face_vertices(&self, i: usize) -> [Vec3; 3] {
        self.face(i).map(|v| self.vert(v))
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }
}
