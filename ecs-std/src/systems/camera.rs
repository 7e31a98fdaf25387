use orbit_ecs::{SystemError, World};

use crate::components::{Camera, CameraSettings, PointerState, update_viewer};
use crate::platform::Window;
use crate::render::GraphicsContext;

/// Startup: create the [`Camera`] and [`PointerState`] resources.
///
/// The viewport starts at the window size; the viewer and projection come
/// from [`CameraSettings`] (defaults if absent).
pub fn create_camera(world: &mut World) -> Result<(), SystemError> {
    let size = world.resource::<Window>()?.size();
    let settings = *world.init_resource::<CameraSettings>()?;
    world.insert_resource(Camera::new(&settings, size))?;
    world.init_resource::<PointerState>()?;
    log::debug!(
        "Camera created: fov {:.1} deg, eye {:?}",
        settings.fov_degrees,
        settings.viewer.eye()
    );
    Ok(())
}

/// Update: follow window size changes into the camera and backend.
pub fn sync_viewport(world: &mut World) -> Result<(), SystemError> {
    let size = world.resource::<Window>()?.size();
    if !world.resource_mut::<Camera>()?.set_viewport(size.x, size.y) {
        return Ok(());
    }
    log::debug!("Viewport resized to {}x{}", size.x, size.y);
    if let Ok(graphics) = world.resource_mut::<GraphicsContext>() {
        graphics.backend.resize(size.x, size.y);
    }
    Ok(())
}

/// Update: read the platform pointer into [`PointerState`].
///
/// A missing sample marks the state stale so the camera skips the frame.
pub fn update_pointer(world: &mut World) -> Result<(), SystemError> {
    let sample = world.resource_mut::<Window>()?.platform.pointer_sample();
    let pointer = world.resource_mut::<PointerState>()?;
    match sample {
        Some(sample) => {
            pointer.update(&sample);
        }
        None => {
            log::debug!("Pointer query failed; skipping pointer update");
            pointer.mark_stale();
        }
    }
    Ok(())
}

/// Update: drive the viewer from the current drag.
///
/// A button transition re-anchors the drag at the current viewer. While
/// buttons are held the viewer is recomputed from the anchor and the total
/// travel since the transition.
pub fn update_camera(world: &mut World) -> Result<(), SystemError> {
    let pointer = world.resource::<PointerState>()?;
    if !pointer.is_fresh() {
        return Ok(());
    }
    let changed = pointer.any_changed();
    let held = pointer.held();
    let viewport = world.resource::<Camera>()?.viewport();
    let delta = pointer.fractional_delta(viewport);

    let camera = world.resource_mut::<Camera>()?;
    if changed {
        camera.snapshot_anchor();
    }
    if !held.is_empty() {
        camera.viewer = update_viewer(&camera.anchor, delta, held);
    }
    Ok(())
}

/// Update: rebuild view and projection after interaction, before drawing.
pub fn recompute_camera_matrices(world: &mut World) -> Result<(), SystemError> {
    world.resource_mut::<Camera>()?.recompute_matrices();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ButtonSet, PointerSample, Viewer};
    use crate::platform::{HeadlessPlatform, PlatformLauncher, ScriptedFrame, WindowConfig};
    use crate::systems::{create_window, poll_events};
    use glam::{UVec2, Vec3};
    use orbit_core::input::MouseButton;

    fn world_with_script(frames: Vec<ScriptedFrame>) -> World {
        let mut world = World::new();
        world
            .insert_resource(PlatformLauncher::new(move |config: &WindowConfig| {
                Ok(HeadlessPlatform::new(config).with_script(frames))
            }))
            .unwrap();
        create_window(&mut world).unwrap();
        create_camera(&mut world).unwrap();
        world
    }

    fn frame(world: &mut World) {
        poll_events(world).unwrap();
        sync_viewport(world).unwrap();
        update_pointer(world).unwrap();
        update_camera(world).unwrap();
        recompute_camera_matrices(world).unwrap();
    }

    fn left(x: f64, y: f64) -> ScriptedFrame {
        ScriptedFrame::Pointer(PointerSample::new(x, y, ButtonSet::from(MouseButton::Left)))
    }

    #[test]
    fn camera_starts_at_window_size() {
        let world = world_with_script(Vec::new());
        let camera = world.resource::<Camera>().unwrap();
        assert_eq!(camera.viewport(), UVec2::new(800, 600));
        assert!(world.contains_resource::<PointerState>());
    }

    #[test]
    fn drag_is_measured_from_anchor() {
        let mut world = world_with_script(vec![
            left(400.0, 300.0),
            left(480.0, 300.0),
            left(560.0, 300.0),
        ]);
        let start = world.resource::<Camera>().unwrap().viewer;

        frame(&mut world);
        assert_eq!(world.resource::<Camera>().unwrap().viewer, start);

        frame(&mut world);
        frame(&mut world);
        let camera = world.resource::<Camera>().unwrap();
        let mut expected = start;
        expected.rotate(160.0 / 800.0, 0.0);
        assert!((camera.viewer.azimuth - expected.azimuth).abs() < 1e-6);
        assert_eq!(camera.anchor, start);
    }

    #[test]
    fn release_reanchors_at_current_viewer() {
        let mut world = world_with_script(vec![
            left(0.0, 0.0),
            left(80.0, 0.0),
            ScriptedFrame::Pointer(PointerSample::new(80.0, 0.0, ButtonSet::EMPTY)),
            ScriptedFrame::Pointer(PointerSample::new(300.0, 0.0, ButtonSet::EMPTY)),
        ]);
        for _ in 0..4 {
            frame(&mut world);
        }
        let camera = world.resource::<Camera>().unwrap();
        assert_eq!(camera.anchor, camera.viewer);
        assert_ne!(camera.viewer, Viewer::default());
    }

    #[test]
    fn missing_sample_skips_camera_update() {
        let mut world = world_with_script(vec![
            left(0.0, 0.0),
            ScriptedFrame::Unavailable,
        ]);
        frame(&mut world);
        let before = world.resource::<Camera>().unwrap().viewer;
        frame(&mut world);
        assert_eq!(world.resource::<Camera>().unwrap().viewer, before);
        assert!(!world.resource::<PointerState>().unwrap().is_fresh());
    }

    #[test]
    fn resize_reaches_camera() {
        let mut world = world_with_script(vec![ScriptedFrame::Resize(UVec2::new(400, 400))]);
        frame(&mut world);
        let camera = world.resource::<Camera>().unwrap();
        assert_eq!(camera.viewport(), UVec2::new(400, 400));
        assert!((camera.aspect_ratio() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn minimized_window_keeps_viewport() {
        let mut world = world_with_script(vec![ScriptedFrame::Resize(UVec2::new(0, 0))]);
        frame(&mut world);
        assert_eq!(world.resource::<Camera>().unwrap().viewport(), UVec2::new(800, 600));
    }

    #[test]
    fn settings_seed_the_viewer() {
        let mut world = World::new();
        world
            .insert_resource(CameraSettings {
                viewer: Viewer::new(Vec3::Y, 12.0),
                ..CameraSettings::default()
            })
            .unwrap();
        world.insert_resource(PlatformLauncher::headless(None)).unwrap();
        create_window(&mut world).unwrap();
        create_camera(&mut world).unwrap();
        let camera = world.resource::<Camera>().unwrap();
        assert_eq!(camera.viewer.focus, Vec3::Y);
        assert_eq!(camera.viewer.distance, 12.0);
    }
}
