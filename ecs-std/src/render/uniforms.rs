//! std140-compatible uniform blocks.

use glam::{Mat3, Mat4, Vec3, Vec4};
use orbit_core::material::Material;

use super::UniformValue;

/// Per-draw transform block.
///
/// The normal matrix is stored as a `Mat4` so every column is 16-byte
/// aligned, matching std140 `mat3` layout.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct ObjectUniforms {
    pub model: Mat4,
    pub normal: Mat4,
    pub mvp: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// xyz = eye position, w = 1.
    pub camera_position: Vec4,
}

impl ObjectUniforms {
    pub fn new(model: Mat4, normal: Mat3, view: Mat4, projection: Mat4, eye: Vec3) -> Self {
        Self {
            model,
            normal: Mat4::from_mat3(normal),
            mvp: projection * view * model,
            view,
            projection,
            camera_position: eye.extend(1.0),
        }
    }

    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.normal)
    }

    /// The block as individually named uniforms.
    pub fn named_values(&self) -> [(&'static str, UniformValue); 6] {
        [
            ("ModelMatrix", UniformValue::Mat4(self.model)),
            ("NormalMatrix", UniformValue::Mat3(self.normal_matrix())),
            ("MVP", UniformValue::Mat4(self.mvp)),
            ("View", UniformValue::Mat4(self.view)),
            ("Projection", UniformValue::Mat4(self.projection)),
            ("CameraPosition", UniformValue::Vec3(self.camera_position.truncate())),
        ]
    }
}

/// Phong material block. The xyz of each color is used; w is padding.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct MaterialUniforms {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
    _pad: [f32; 3],
}

impl MaterialUniforms {
    pub fn named_values(&self) -> [(&'static str, UniformValue); 4] {
        [
            ("Material.Ka", UniformValue::Vec3(self.ambient.truncate())),
            ("Material.Kd", UniformValue::Vec3(self.diffuse.truncate())),
            ("Material.Ks", UniformValue::Vec3(self.specular.truncate())),
            ("Material.Shininess", UniformValue::Float(self.shininess)),
        ]
    }
}

impl From<&Material> for MaterialUniforms {
    fn from(material: &Material) -> Self {
        Self {
            ambient: material.ambient.extend(0.0),
            diffuse: material.diffuse.extend(0.0),
            specular: material.specular.extend(0.0),
            shininess: material.shininess,
            _pad: [0.0; 3],
        }
    }
}
