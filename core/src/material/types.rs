//! Phong material definition.

use glam::Vec3;

/// Ambient/diffuse/specular surface description.
///
/// Colors are linear RGB. `shininess` is the specular exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance (`Ka`).
    pub ambient: Vec3,
    /// Diffuse reflectance (`Kd`).
    pub diffuse: Vec3,
    /// Specular reflectance (`Ks`).
    pub specular: Vec3,
    /// Specular exponent.
    pub shininess: f32,
}

impl Material {
    /// Create a material from its four Phong terms.
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Grey material with the same intensity on every channel.
    pub fn grey(ambient: f32, diffuse: f32, specular: f32, shininess: f32) -> Self {
        Self::new(
            Vec3::splat(ambient),
            Vec3::splat(diffuse),
            Vec3::splat(specular),
            shininess,
        )
    }

    /// Set the ambient term.
    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the diffuse term.
    pub fn with_diffuse(mut self, diffuse: Vec3) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the specular term.
    pub fn with_specular(mut self, specular: Vec3) -> Self {
        self.specular = specular;
        self
    }

    /// Set the specular exponent.
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::grey(0.1, 0.9, 0.95, 100.0)
    }
}
