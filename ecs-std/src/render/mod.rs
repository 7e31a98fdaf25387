//! Graphics backend abstraction and the resources the render pass reads.

mod recording;
mod uniforms;

use std::collections::HashMap;

use glam::{Mat3, Mat4, Vec3, Vec4};
use orbit_core::mesh::Mesh;
use orbit_ecs::{Entity, SystemError};

pub use recording::{CommandLog, RecordingBackend, RenderCommand};
pub use uniforms::{MaterialUniforms, ObjectUniforms};

/// Errors raised by a [`RenderBackend`] or the render pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("entity {entity} references unknown material `{name}`")]
    MissingMaterial { entity: Entity, name: String },
    #[error("entity {entity} references unknown shader `{name}`")]
    MissingShader { entity: Entity, name: String },
    #[error("entity {entity} references model `{name}` which was never uploaded")]
    MissingModel { entity: Entity, name: String },
    #[error("program `{0}` was never created")]
    UnknownProgram(String),
    #[error("no program bound")]
    NoProgramBound,
    #[error("mesh id {0} is not resident")]
    UnknownMesh(u32),
    #[error("backend failure: {0}")]
    Backend(String),
    /// Several entities failed in one pass.
    #[error("{} draw(s) failed", .0.len())]
    Multiple(Vec<RenderError>),
}

impl From<RenderError> for SystemError {
    fn from(error: RenderError) -> Self {
        SystemError::other(error)
    }
}

/// A typed uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// A mesh resident on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuMesh {
    pub id: u32,
    pub index_count: u32,
}

/// Vertex and fragment sources of a shader program.
///
/// Sources are opaque to the engine; loading and compiling them is the
/// backend's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// The graphics API seen by render systems.
///
/// Calls follow the per-draw protocol: `bind_program`, any number of
/// `set_uniform`/`set_uniform_block`, `draw_indexed`, `unbind_program`.
pub trait RenderBackend {
    /// Compile and link a program under `name`.
    fn create_program(&mut self, name: &str, source: &ShaderSource) -> Result<(), RenderError>;

    /// Make `mesh` resident and return its handle.
    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<GpuMesh, RenderError>;

    /// Clear the color and depth targets.
    fn clear(&mut self, color: Vec4);

    fn bind_program(&mut self, name: &str) -> Result<(), RenderError>;

    /// Set one named uniform on the bound program.
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), RenderError>;

    /// Upload a raw uniform block to the bound program.
    fn set_uniform_block(&mut self, name: &str, data: &[u8]) -> Result<(), RenderError>;

    /// Draw all triangles of a resident mesh with the bound program.
    fn draw_indexed(&mut self, mesh: GpuMesh) -> Result<(), RenderError>;

    fn unbind_program(&mut self);

    /// Show the finished frame.
    fn present(&mut self) -> Result<(), RenderError>;

    /// Resize the output targets.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Resource owning the active backend.
pub struct GraphicsContext {
    pub backend: Box<dyn RenderBackend>,
    pub clear_color: Vec4,
}

impl GraphicsContext {
    pub const DEFAULT_CLEAR_COLOR: Vec4 = Vec4::new(0.1, 0.1, 0.15, 1.0);

    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        Self {
            backend,
            clear_color: Self::DEFAULT_CLEAR_COLOR,
        }
    }
}

/// Uploaded meshes keyed by model name.
#[derive(Debug, Default)]
pub struct GpuModels {
    models: HashMap<String, GpuMesh>,
}

impl GpuModels {
    pub fn get(&self, name: &str) -> Option<GpuMesh> {
        self.models.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, mesh: GpuMesh) -> Option<GpuMesh> {
        self.models.insert(name.into(), mesh)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }
}

/// Shader programs known to the backend, keyed by name.
#[derive(Debug, Default)]
pub struct ShaderLibrary {
    programs: HashMap<String, ShaderSource>,
}

impl ShaderLibrary {
    /// Name of the Phong program every scene can rely on.
    pub const DEFAULT: &'static str = "default";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, source: ShaderSource) {
        self.programs.insert(name.into(), source);
    }

    pub fn get(&self, name: &str) -> Option<&ShaderSource> {
        self.programs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
