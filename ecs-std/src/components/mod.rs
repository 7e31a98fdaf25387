mod camera;
mod handles;
mod pointer;
mod transform;

pub use camera::{Camera, CameraSettings, Viewer, update_viewer};
pub use handles::{MaterialHandle, ModelHandle, ShaderHandle};
pub use pointer::{ButtonSet, PointerSample, PointerState};
pub use transform::Transform;
