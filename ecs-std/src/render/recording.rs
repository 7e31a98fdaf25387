use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use glam::Vec4;
use orbit_core::mesh::Mesh;

use super::{GpuMesh, RenderBackend, RenderError, ShaderSource, UniformValue};

/// A backend call as seen by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    CreateProgram(String),
    UploadMesh { id: u32, vertex_count: usize, index_count: usize },
    Clear(Vec4),
    BindProgram(String),
    SetUniform { name: String, value: UniformValue },
    SetUniformBlock { name: String, data: Vec<u8> },
    DrawIndexed(GpuMesh),
    UnbindProgram,
    Present,
    Resize(u32, u32),
}

/// Shared view of a [`RecordingBackend`]'s command stream.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Rc<RefCell<Vec<RenderCommand>>>);

impl CommandLog {
    pub fn snapshot(&self) -> Vec<RenderCommand> {
        self.0.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<RenderCommand> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Number of recorded draw calls.
    pub fn draw_count(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawIndexed(_)))
            .count()
    }

    fn push(&self, command: RenderCommand) {
        self.0.borrow_mut().push(command);
    }
}

/// Headless backend that validates the draw protocol and records every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: CommandLog,
    programs: HashSet<String>,
    meshes: HashMap<u32, u32>,
    bound: Option<String>,
    next_mesh_id: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend appending to an existing log.
    pub fn with_log(log: CommandLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Handle to the command stream that stays valid after the backend is boxed.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    pub fn bound_program(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    fn require_bound(&self) -> Result<(), RenderError> {
        self.bound.as_ref().map(|_| ()).ok_or(RenderError::NoProgramBound)
    }
}

impl RenderBackend for RecordingBackend {
    fn create_program(&mut self, name: &str, source: &ShaderSource) -> Result<(), RenderError> {
        if source.vertex.is_empty() || source.fragment.is_empty() {
            return Err(RenderError::Backend(format!(
                "program `{name}` has an empty stage"
            )));
        }
        self.programs.insert(name.to_owned());
        self.log.push(RenderCommand::CreateProgram(name.to_owned()));
        Ok(())
    }

    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<GpuMesh, RenderError> {
        mesh.validate()
            .map_err(|e| RenderError::Backend(e.to_string()))?;
        let index_count = u32::try_from(mesh.index_count())
            .map_err(|_| RenderError::Backend("index buffer exceeds u32".into()))?;

        let id = self.next_mesh_id;
        self.next_mesh_id += 1;
        self.meshes.insert(id, index_count);
        self.log.push(RenderCommand::UploadMesh {
            id,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
        });
        Ok(GpuMesh { id, index_count })
    }

    fn clear(&mut self, color: Vec4) {
        self.log.push(RenderCommand::Clear(color));
    }

    fn bind_program(&mut self, name: &str) -> Result<(), RenderError> {
        if !self.programs.contains(name) {
            return Err(RenderError::UnknownProgram(name.to_owned()));
        }
        self.bound = Some(name.to_owned());
        self.log.push(RenderCommand::BindProgram(name.to_owned()));
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), RenderError> {
        self.require_bound()?;
        self.log.push(RenderCommand::SetUniform {
            name: name.to_owned(),
            value,
        });
        Ok(())
    }

    fn set_uniform_block(&mut self, name: &str, data: &[u8]) -> Result<(), RenderError> {
        self.require_bound()?;
        self.log.push(RenderCommand::SetUniformBlock {
            name: name.to_owned(),
            data: data.to_vec(),
        });
        Ok(())
    }

    fn draw_indexed(&mut self, mesh: GpuMesh) -> Result<(), RenderError> {
        self.require_bound()?;
        if !self.meshes.contains_key(&mesh.id) {
            return Err(RenderError::UnknownMesh(mesh.id));
        }
        self.log.push(RenderCommand::DrawIndexed(mesh));
        Ok(())
    }

    fn unbind_program(&mut self) {
        self.bound = None;
        self.log.push(RenderCommand::UnbindProgram);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if let Some(program) = &self.bound {
            return Err(RenderError::Backend(format!(
                "present while `{program}` is still bound"
            )));
        }
        self.log.push(RenderCommand::Present);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log.push(RenderCommand::Resize(width, height));
    }
}
