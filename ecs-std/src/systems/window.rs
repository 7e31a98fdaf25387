use orbit_ecs::{SystemError, World};

use crate::platform::{PlatformLauncher, Window, WindowConfig};

/// Startup: open the window through the registered [`PlatformLauncher`].
///
/// The launcher is consumed. Fails with [`SystemError::Initialization`] if
/// no launcher was registered or the platform refused to open.
pub fn create_window(world: &mut World) -> Result<(), SystemError> {
    let launcher = world.remove_resource::<PlatformLauncher>().ok_or_else(|| {
        SystemError::Initialization("no PlatformLauncher registered".into())
    })?;
    let config = world.init_resource::<WindowConfig>()?.clone();

    let platform = launcher
        .launch(&config)
        .map_err(|e| SystemError::Initialization(e.to_string()))?;
    let window = world.insert_resource(Window::new(platform, config.title.clone()))?;

    let size = window.size();
    log::info!("Window '{}' created ({}x{})", config.title, size.x, size.y);
    Ok(())
}

/// Update: pump window events. A failed poll skips the frame's events.
pub fn poll_events(world: &mut World) -> Result<(), SystemError> {
    let window = world.resource_mut::<Window>()?;
    if let Err(e) = window.platform.poll_events() {
        log::debug!("Skipping events this frame: {}", e);
    }
    Ok(())
}

/// Shutdown: drop the window.
pub fn close_window(world: &mut World) -> Result<(), SystemError> {
    if let Some(window) = world.remove_resource::<Window>() {
        log::info!("Window '{}' closed", window.title);
    }
    Ok(())
}

/// Whether the window asked to close. `true` when no window exists.
pub fn window_should_close(world: &World) -> bool {
    world
        .resource::<Window>()
        .map(Window::should_close)
        .unwrap_or(true)
}
