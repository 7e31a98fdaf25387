use glam::{Mat3, Mat4, Quat, Vec3};
use orbit_core::math::normal_matrix;

/// Local transform of an entity: translation, rotation and scale.
///
/// Padding fields (`_pad*`) are required for `bytemuck::Pod` because
/// Quat has 16-byte SIMD alignment on x86_64.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Transform {
    /// Translation in world units.
    pub translation: Vec3,
    _pad0: f32,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Non-uniform scale.
    pub scale: Vec3,
    _pad1: f32,
}

impl Transform {
    /// Identity transform: origin position, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        _pad0: 0.0,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        _pad1: 0.0,
    };

    /// Create from translation, rotation, and scale.
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            _pad0: 0.0,
            rotation,
            scale,
            _pad1: 0.0,
        }
    }

    /// Create from translation only (identity rotation and scale).
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Create from rotation only (origin position and unit scale).
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set a uniform scale on all three axes.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Compute the model matrix (T * R * S): scale first, then rotate, then translate.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Inverse-transpose of the model matrix's upper 3x3, for transforming normals.
    pub fn normal_matrix(&self) -> Mat3 {
        normal_matrix(&self.to_matrix())
    }

    /// Apply the full transform to a point.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::math::quat_from_axis_degrees;

    fn floor() -> Transform {
        Transform::new(
            Vec3::new(0.0, -1.0, 0.0),
            quat_from_axis_degrees(Vec3::X, 90.0),
            Vec3::splat(10.0),
        )
    }

    #[test]
    fn identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_matrix(), Mat4::IDENTITY);
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }

    #[test]
    fn floor_quad_up_point_lands_in_front() {
        // Scale to (0, 10, 0), rotate to (0, 0, 10), translate to (0, -1, 10).
        let p = floor().transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!((p - Vec3::new(0.0, -1.0, 10.0)).length() < 1e-4, "{p:?}");
    }

    #[test]
    fn floor_quad_normal_points_up() {
        let n = floor().normal_matrix() * Vec3::NEG_Z;
        assert!((n.normalize() - Vec3::Y).length() < 1e-5, "{n:?}");
    }

    #[test]
    fn order_is_scale_rotate_translate() {
        let t = Transform::new(
            Vec3::new(5.0, 0.0, 0.0),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(2.0, 1.0, 1.0),
        );
        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (5,2,0)
        let p = t.transform_point(Vec3::X);
        assert!((p - Vec3::new(5.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn builders() {
        let t = Transform::IDENTITY
            .with_translation(Vec3::Y)
            .with_rotation(Quat::from_rotation_x(1.0))
            .with_uniform_scale(3.0);
        assert_eq!(t.translation, Vec3::Y);
        assert_eq!(t.scale, Vec3::splat(3.0));
    }

    #[test]
    fn pod_layout() {
        assert_eq!(std::mem::size_of::<Transform>(), 48);
        let bytes = bytemuck::bytes_of(&Transform::IDENTITY);
        let back: &Transform = bytemuck::from_bytes(bytes);
        assert_eq!(*back, Transform::IDENTITY);
    }
}
