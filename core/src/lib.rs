//! # Orbit Viewer Core
//!
//! GPU-agnostic building blocks shared by the ECS and rendering layers:
//!
//! - [`math`] - glam re-exports and projection/normal-matrix helpers
//! - [`mesh`] - CPU-side [`Mesh`](mesh::Mesh) buffers and procedural generators
//! - [`material`] - Phong [`Material`](material::Material) values and the named [`MaterialCache`](material::MaterialCache)
//! - [`input`] - Platform-agnostic pointer button identifiers

pub mod input;
pub mod material;
pub mod math;
pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core version. Called once by the application runner.
pub fn init() {
    log::info!("Orbit Viewer Core v{} initialized", VERSION);
}
