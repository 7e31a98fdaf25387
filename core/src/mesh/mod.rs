//! CPU-side mesh types and generators.
//!
//! - [`Mesh`] - Index-aligned position/normal buffers plus a triangle list
//! - [`MeshError`] - Validation and generator parameter errors
//! - [`generators`] - Procedural surfaces (torus, floor quad)

mod data;
pub mod generators;

pub use data::{Mesh, MeshError};
pub use generators::{TorusDescriptor, generate_quad, generate_torus};
