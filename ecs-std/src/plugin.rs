use orbit_ecs::{Core, Phase, Plugin, ScheduleError};

use crate::components::CameraSettings;
use crate::platform::WindowConfig;
use crate::systems::*;

/// Installs the window, camera and render pipeline.
///
/// Startup opens the window before touching graphics. Update runs input,
/// then camera, then drawing. Shutdown tears down in reverse.
///
/// The window and camera configuration are inserted only if absent, so
/// values placed in the world beforehand win.
#[derive(Debug, Clone, Default)]
pub struct ViewerPlugin {
    pub window: WindowConfig,
    pub camera: CameraSettings,
}

impl ViewerPlugin {
    pub fn new(window: WindowConfig, camera: CameraSettings) -> Self {
        Self { window, camera }
    }
}

impl Plugin for ViewerPlugin {
    fn build(&self, core: &mut Core) -> Result<(), ScheduleError> {
        let world = core.world_mut();
        if !world.contains_resource::<WindowConfig>() {
            world
                .insert_resource(self.window.clone())
                .map_err(ScheduleError::plugin::<Self>)?;
        }
        if !world.contains_resource::<CameraSettings>() {
            world
                .insert_resource(self.camera)
                .map_err(ScheduleError::plugin::<Self>)?;
        }

        core.register_system(Phase::Startup, create_window)?;
        core.register_system(Phase::Startup, init_graphics)?;
        core.register_system(Phase::Startup, load_default_shader)?;
        core.register_system(Phase::Startup, load_default_materials)?;
        core.register_system(Phase::Startup, create_camera)?;

        core.register_system(Phase::Update, poll_events)?;
        core.register_system(Phase::Update, sync_viewport)?;
        core.register_system(Phase::Update, update_pointer)?;
        core.register_system(Phase::Update, update_camera)?;
        core.register_system(Phase::Update, recompute_camera_matrices)?;
        core.register_system(Phase::Update, upload_meshes)?;
        core.register_system(Phase::Update, render_meshes)?;
        core.register_system(Phase::Update, present)?;

        core.register_system(Phase::Shutdown, release_graphics)?;
        core.register_system(Phase::Shutdown, close_window)?;
        log::debug!("ViewerPlugin installed");
        Ok(())
    }
}
