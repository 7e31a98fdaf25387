//! # Orbit Viewer Standard Components and Systems
//!
//! Bridges the generic ECS with a window, a camera and a renderer.
//!
//! ## Components and resources
//!
//! - [`Transform`] - Entity placement (translation, rotation, scale)
//! - [`ModelHandle`] / [`MaterialHandle`] / [`ShaderHandle`] - Named references resolved by the render pass
//! - [`Camera`] / [`Viewer`] - Projection, view and the orbit controller state
//! - [`PointerState`] - Per-frame button edges and cursor travel
//!
//! ## Platform and rendering
//!
//! - [`platform`] - The [`Platform`](platform::Platform) window trait and a headless implementation
//! - [`render`] - The [`RenderBackend`](render::RenderBackend) trait, uniform blocks and a recording backend
//!
//! ## Systems
//!
//! [`ViewerPlugin`] registers everything in [`systems`] in pipeline order.

pub mod components;
pub mod platform;
mod plugin;
pub mod render;
pub mod systems;

pub use components::*;
pub use plugin::ViewerPlugin;
