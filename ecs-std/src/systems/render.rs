use orbit_core::material::{DEFAULT_MATERIAL, Material, MaterialCache};
use orbit_core::mesh::Mesh;
use orbit_ecs::{Entity, SystemError, World};

use crate::components::{Camera, MaterialHandle, ModelHandle, ShaderHandle, Transform};
use crate::platform::Window;
use crate::render::{
    GpuModels, GraphicsContext, MaterialUniforms, ObjectUniforms, RenderBackend, RenderError,
    ShaderLibrary, ShaderSource,
};

/// Vertex stage of the default Phong program.
pub const DEFAULT_VERTEX_SHADER: &str = "shaders/phong.vert";
/// Fragment stage of the default Phong program.
pub const DEFAULT_FRAGMENT_SHADER: &str = "shaders/phong.frag";

/// Startup: create the render backend from the window.
///
/// Must run after `create_window`. Also installs empty [`GpuModels`] and
/// [`ShaderLibrary`] resources.
pub fn init_graphics(world: &mut World) -> Result<(), SystemError> {
    let backend = world
        .resource_mut::<Window>()?
        .platform
        .create_backend()
        .map_err(|e| SystemError::Initialization(e.to_string()))?;
    world.insert_resource(GraphicsContext::new(backend))?;
    world.init_resource::<GpuModels>()?;
    world.init_resource::<ShaderLibrary>()?;
    log::info!("Graphics context initialized");
    Ok(())
}

/// Startup: create the default Phong program.
pub fn load_default_shader(world: &mut World) -> Result<(), SystemError> {
    let source = ShaderSource::new(DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER);
    world
        .resource_mut::<GraphicsContext>()?
        .backend
        .create_program(ShaderLibrary::DEFAULT, &source)?;
    world
        .resource_mut::<ShaderLibrary>()?
        .insert(ShaderLibrary::DEFAULT, source);
    log::debug!("Shader '{}' loaded", ShaderLibrary::DEFAULT);
    Ok(())
}

/// Startup: make sure the default material exists. A material registered
/// under the default name beforehand is kept.
pub fn load_default_materials(world: &mut World) -> Result<(), SystemError> {
    let cache = world.init_resource::<MaterialCache>()?;
    if !cache.contains(DEFAULT_MATERIAL) {
        cache.add(DEFAULT_MATERIAL, Material::default());
    }
    Ok(())
}

/// Update: upload every [`Mesh`] whose [`ModelHandle`] has no GPU copy yet.
///
/// Entities sharing a model name share one upload. On a backend failure the
/// uploads that already succeeded are still recorded, so a later call only
/// retries the remaining models.
pub fn upload_meshes(world: &mut World) -> Result<(), SystemError> {
    world.resource_scope(upload_pending)?
}

fn upload_pending(world: &mut World, graphics: &mut GraphicsContext) -> Result<(), SystemError> {
    let Some(meshes) = world.storage::<Mesh>() else {
        return Ok(());
    };
    let models = world.resource::<GpuModels>()?;

    let mut uploaded = Vec::new();
    let mut failure = None;
    for (entity, mesh) in meshes.iter() {
        let Some(handle) = world.get::<ModelHandle>(entity) else {
            continue;
        };
        let name = handle.as_str();
        if models.contains(name) || uploaded.iter().any(|(n, _)| n == name) {
            continue;
        }
        match graphics.backend.upload_mesh(mesh) {
            Ok(gpu) => {
                log::debug!(
                    "Uploaded model '{}' ({} vertices, {} indices)",
                    name,
                    mesh.vertex_count(),
                    mesh.index_count()
                );
                uploaded.push((name.to_owned(), gpu));
            }
            Err(e) => {
                log::warn!("Upload of model '{}' failed: {}", name, e);
                failure = Some(e);
                break;
            }
        }
    }

    let models = world.resource_mut::<GpuModels>()?;
    for (name, gpu) in uploaded {
        models.insert(name, gpu);
    }
    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Update: clear the frame and draw every renderable entity.
///
/// Entities are visited in [`Transform`] storage order. Those without all
/// three handles are not renderable and are ignored. A renderable entity
/// whose shader, material or model cannot be resolved is skipped and the
/// pass continues; the failures are returned afterwards.
pub fn render_meshes(world: &mut World) -> Result<(), SystemError> {
    world.resource_scope(|world, graphics: &mut GraphicsContext| draw_scene(world, graphics))?
}

fn draw_scene(world: &World, graphics: &mut GraphicsContext) -> Result<(), SystemError> {
    let frame = FrameResources {
        camera: world.resource::<Camera>()?,
        materials: world.resource::<MaterialCache>()?,
        shaders: world.resource::<ShaderLibrary>()?,
        models: world.resource::<GpuModels>()?,
    };

    let clear_color = graphics.clear_color;
    let backend = graphics.backend.as_mut();
    backend.clear(clear_color);

    let Some(transforms) = world.storage::<Transform>() else {
        return Ok(());
    };

    let mut failures = Vec::new();
    let mut drawn = 0usize;
    for (entity, transform) in transforms.iter() {
        let (Some(model), Some(material), Some(shader)) = (
            world.get::<ModelHandle>(entity),
            world.get::<MaterialHandle>(entity),
            world.get::<ShaderHandle>(entity),
        ) else {
            continue;
        };
        let draw = DrawItem {
            entity,
            transform,
            model,
            material,
            shader,
        };
        match frame.draw(backend, &draw) {
            Ok(()) => drawn += 1,
            Err(e) => {
                log::warn!("Skipping {}: {}", entity, e);
                failures.push(e);
            }
        }
    }
    log::trace!("Drew {} entities", drawn);

    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0).into()),
        _ => Err(RenderError::Multiple(failures).into()),
    }
}

struct FrameResources<'w> {
    camera: &'w Camera,
    materials: &'w MaterialCache,
    shaders: &'w ShaderLibrary,
    models: &'w GpuModels,
}

struct DrawItem<'w> {
    entity: Entity,
    transform: &'w Transform,
    model: &'w ModelHandle,
    material: &'w MaterialHandle,
    shader: &'w ShaderHandle,
}

impl FrameResources<'_> {
    /// Resolve the entity's handles, then issue one bind/uniforms/draw/unbind
    /// sequence. Nothing is sent to the backend if a handle is unresolved.
    fn draw(
        &self,
        backend: &mut dyn RenderBackend,
        item: &DrawItem<'_>,
    ) -> Result<(), RenderError> {
        let program = item.shader.as_str();
        if !self.shaders.contains(program) {
            return Err(RenderError::MissingShader {
                entity: item.entity,
                name: program.to_owned(),
            });
        }
        let material = self
            .materials
            .get(item.material.as_str())
            .ok_or_else(|| RenderError::MissingMaterial {
                entity: item.entity,
                name: item.material.as_str().to_owned(),
            })?;
        let mesh = self
            .models
            .get(item.model.as_str())
            .ok_or_else(|| RenderError::MissingModel {
                entity: item.entity,
                name: item.model.as_str().to_owned(),
            })?;

        let object = ObjectUniforms::new(
            item.transform.to_matrix(),
            item.transform.normal_matrix(),
            self.camera.view(),
            self.camera.projection(),
            self.camera.eye(),
        );
        let material = MaterialUniforms::from(material);

        backend.bind_program(program)?;
        let result = (|| -> Result<(), RenderError> {
            for (name, value) in object.named_values() {
                backend.set_uniform(name, value)?;
            }
            for (name, value) in material.named_values() {
                backend.set_uniform(name, value)?;
            }
            backend.set_uniform_block("ObjectUniforms", bytemuck::bytes_of(&object))?;
            backend.set_uniform_block("MaterialUniforms", bytemuck::bytes_of(&material))?;
            backend.draw_indexed(mesh)
        })();
        backend.unbind_program();
        result
    }
}

/// Update: show the frame.
pub fn present(world: &mut World) -> Result<(), SystemError> {
    world.resource_mut::<GraphicsContext>()?.backend.present()?;
    Ok(())
}

/// Shutdown: drop GPU handles and the backend.
pub fn release_graphics(world: &mut World) -> Result<(), SystemError> {
    let released = world
        .remove_resource::<GpuModels>()
        .map_or(0, |models| models.len());
    if world.remove_resource::<GraphicsContext>().is_some() {
        log::info!("Graphics context released ({} models)", released);
    }
    Ok(())
}
