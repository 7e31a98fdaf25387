//! Mesh generators for procedural surfaces.
//!
//! Generators are pure: the same descriptor always yields the same buffers.

use std::f32::consts::TAU;

use glam::Vec3;

use super::data::{Mesh, MeshError};

/// Parameters of a ring-and-tube torus.
///
/// The torus lies in the XY plane around the Z axis. `rings` subdivides the
/// sweep around Z (angle `u`), `sides` subdivides the tube cross-section
/// (angle `v`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusDescriptor {
    /// Distance from the torus center to the tube center (`R`).
    pub outer_radius: f32,
    /// Tube radius (`r`).
    pub inner_radius: f32,
    /// Ring subdivisions around the sweep axis.
    pub rings: u32,
    /// Side subdivisions around the tube.
    pub sides: u32,
    /// Emit quads between the last ring and the duplicated seam ring.
    pub closed_seam: bool,
}

impl TorusDescriptor {
    /// Default ring and side resolution.
    pub const DEFAULT_RESOLUTION: u32 = 100;

    /// Create a descriptor with the default 100x100 resolution and an open seam.
    pub fn new(outer_radius: f32, inner_radius: f32) -> Self {
        Self {
            outer_radius,
            inner_radius,
            rings: Self::DEFAULT_RESOLUTION,
            sides: Self::DEFAULT_RESOLUTION,
            closed_seam: false,
        }
    }

    /// Set ring and side subdivisions.
    pub fn with_resolution(mut self, rings: u32, sides: u32) -> Self {
        self.rings = rings;
        self.sides = sides;
        self
    }

    /// Close the sweep seam by connecting the last ring pair.
    pub fn with_closed_seam(mut self, closed: bool) -> Self {
        self.closed_seam = closed;
        self
    }

    /// Number of vertices the generator will emit: `(rings + 1) * sides`.
    pub fn vertex_count(&self) -> usize {
        (self.rings as usize + 1) * self.sides as usize
    }

    /// Number of ring pairs joined by quads.
    pub fn ring_pairs(&self) -> u32 {
        if self.closed_seam {
            self.rings
        } else {
            self.rings.saturating_sub(1)
        }
    }

    /// Number of indices the generator will emit.
    pub fn index_count(&self) -> usize {
        self.ring_pairs() as usize * self.sides as usize * 6
    }

    /// Reject radii and resolutions that would produce degenerate normals.
    pub fn validate(&self) -> Result<(), MeshError> {
        if !self.inner_radius.is_finite() || self.inner_radius <= 0.0 {
            return Err(MeshError::InvalidParameter {
                name: "inner_radius",
                reason: format!("must be finite and positive, got {}", self.inner_radius),
            });
        }
        if !self.outer_radius.is_finite() || self.outer_radius <= 0.0 {
            return Err(MeshError::InvalidParameter {
                name: "outer_radius",
                reason: format!("must be finite and positive, got {}", self.outer_radius),
            });
        }
        // R <= r lets R + r*cos(v) reach zero, collapsing the normal gradient.
        if self.outer_radius <= self.inner_radius {
            return Err(MeshError::InvalidParameter {
                name: "outer_radius",
                reason: format!(
                    "must exceed inner_radius ({} <= {})",
                    self.outer_radius, self.inner_radius
                ),
            });
        }
        if self.rings < 3 {
            return Err(MeshError::InvalidParameter {
                name: "rings",
                reason: format!("at least 3 required, got {}", self.rings),
            });
        }
        if self.sides < 3 {
            return Err(MeshError::InvalidParameter {
                name: "sides",
                reason: format!("at least 3 required, got {}", self.sides),
            });
        }
        if self.vertex_count() > u32::MAX as usize {
            return Err(MeshError::InvalidParameter {
                name: "rings",
                reason: format!(
                    "{} vertices do not fit 32-bit indices",
                    self.vertex_count()
                ),
            });
        }
        Ok(())
    }
}

impl Default for TorusDescriptor {
    fn default() -> Self {
        Self::new(1.5, 0.3)
    }
}

/// Generate a torus mesh.
///
/// Rings `0..=rings` are emitted (ring `rings` duplicates ring 0 so the seam
/// has its own vertices). Sides wrap modulo `sides`. Each quad is split into
/// the triangles `(a, b, c)` and `(a, c, d)` where `a`/`d` lie on ring `i` and
/// `b`/`c` on ring `i + 1`, giving a consistent front-face winding.
pub fn generate_torus(desc: &TorusDescriptor) -> Result<Mesh, MeshError> {
    desc.validate()?;

    let rings = desc.rings;
    let sides = desc.sides;
    let mut mesh = Mesh::with_capacity(desc.vertex_count(), desc.index_count());

    let ring_factor = TAU / rings as f32;
    let side_factor = TAU / sides as f32;

    for ring in 0..=rings {
        let (su, cu) = (ring as f32 * ring_factor).sin_cos();

        for side in 0..sides {
            let (sv, cv) = (side as f32 * side_factor).sin_cos();
            let rho = desc.outer_radius + desc.inner_radius * cv;

            let gradient = Vec3::new(cv * cu * rho, cv * su * rho, sv * rho);
            mesh.vertices
                .push(Vec3::new(rho * cu, rho * su, desc.inner_radius * sv));
            mesh.normals.push(gradient.normalize());
        }
    }

    for ring in 0..desc.ring_pairs() {
        let ring_start = ring * sides;
        let next_ring_start = (ring + 1) * sides;

        for side in 0..sides {
            let next_side = (side + 1) % sides;
            mesh.indices.extend_from_slice(&[
                ring_start + side,
                next_ring_start + side,
                next_ring_start + next_side,
                ring_start + side,
                next_ring_start + next_side,
                ring_start + next_side,
            ]);
        }
    }

    Ok(mesh.with_label("torus"))
}

/// Generate a square on the XY plane facing -Z.
///
/// Corners sit at `±half_extent`. Rotate it 90° around X to lay it flat as a floor.
pub fn generate_quad(half_extent: f32) -> Mesh {
    let h = half_extent;
    let mut mesh = Mesh::with_capacity(4, 6);
    mesh.vertices.extend_from_slice(&[
        Vec3::new(-h, h, 0.0),
        Vec3::new(h, h, 0.0),
        Vec3::new(-h, -h, 0.0),
        Vec3::new(h, -h, 0.0),
    ]);
    mesh.normals.extend_from_slice(&[Vec3::NEG_Z; 4]);
    mesh.indices.extend_from_slice(&[2, 0, 1, 2, 1, 3]);
    mesh.with_label("quad")
}
