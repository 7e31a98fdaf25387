//! Systems run by [`ViewerPlugin`](crate::ViewerPlugin).
//!
//! Every system is a plain `fn(&mut World) -> Result<(), SystemError>`.

mod camera;
mod render;
mod window;

pub use camera::{
    create_camera, recompute_camera_matrices, sync_viewport, update_camera, update_pointer,
};
pub use render::{
    DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER, init_graphics, load_default_materials,
    load_default_shader, present, release_graphics, render_meshes, upload_meshes,
};
pub use window::{close_window, create_window, poll_events, window_should_close};
