//! CPU-side mesh data.

use glam::Vec3;

/// Errors produced by mesh validation and procedural generators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A generator received a parameter it cannot build a surface from.
    #[error("invalid mesh parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
    /// Normals are not index-aligned with vertices.
    #[error("normal count {normals} does not match vertex count {vertices}")]
    NormalCountMismatch {
        /// Number of vertex positions.
        vertices: usize,
        /// Number of normals.
        normals: usize,
    },
    /// The index buffer does not describe whole triangles.
    #[error("index buffer length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
    /// An index points past the end of the vertex buffer.
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value.
        index: u32,
        /// Position of the index inside the index buffer.
        position: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// A CPU-side triangle mesh.
///
/// `normals[i]` belongs to `vertices[i]`; `indices` is a flat list of
/// triangle triples. Generators always produce meshes that pass
/// [`validate`](Mesh::validate).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions in model space.
    pub vertices: Vec<Vec3>,
    /// Unit normals, one per vertex.
    pub normals: Vec<Vec3>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
    label: Option<String>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with reserved buffer capacity.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
            label: None,
        }
    }

    /// Build a mesh from raw buffers, rejecting inconsistent data.
    pub fn from_parts(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        let mesh = Self {
            vertices,
            normals,
            indices,
            label: None,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Debug label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of whole triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Check the mesh invariants: aligned normals, whole triangles, in-range indices.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.normals.len() != self.vertices.len() {
            return Err(MeshError::NormalCountMismatch {
                vertices: self.vertices.len(),
                normals: self.normals.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }
        Ok(())
    }
}
