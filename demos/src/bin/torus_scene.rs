//! # Torus Scene
//!
//! A floor and two tori lit with Phong shading. Drag with the left button
//! to orbit, the right button to zoom and the middle button to pan.

use orbit_app::{App, AppArgs, AppError, DefaultAppArgs};
use orbit_demos::torus_scene::TorusScene;

/// Frames rendered by the headless window when `--max-frames` is not given.
const DEFAULT_FRAMES: u64 = 600;

fn main() -> Result<(), AppError> {
    let args = DefaultAppArgs::parse().or_max_frames(DEFAULT_FRAMES);
    App::run(TorusScene, args)
}
