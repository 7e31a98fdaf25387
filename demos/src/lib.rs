//! # Orbit Viewer Demos
//!
//! ## Available Demos
//!
//! - `torus_scene` - A floor quad and two lit tori under an orbit camera

pub mod torus_scene;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
