//! Math type re-exports and helper functions.
//!
//! All rendering math is `f32` glam types. Cursor positions use `DVec2`
//! because platform layers report them as doubles.

pub use glam;
pub use glam::{DVec2, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Inverse-transpose of the model matrix's upper-left 3x3 block.
///
/// Transforms normals correctly under non-uniform scale. A singular block
/// (zero scale on some axis) yields the identity.
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(*model);
    if upper.determinant().abs() <= f32::EPSILON {
        return Mat3::IDENTITY;
    }
    upper.inverse().transpose()
}

/// Right-handed perspective projection with OpenGL depth range [-1, 1].
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    Mat4::perspective_rh_gl(yfov, aspect, znear, zfar)
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}

/// Quaternion rotating `degrees` around `axis` (normalized internally).
pub fn quat_from_axis_degrees(axis: Vec3, degrees: f32) -> Quat {
    Quat::from_axis_angle(axis.normalize(), degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_matrix_of_identity() {
        assert_eq!(normal_matrix(&Mat4::IDENTITY), Mat3::IDENTITY);
    }

    #[test]
    fn normal_matrix_ignores_translation() {
        let model = Mat4::from_translation(Vec3::new(3.0, -2.0, 7.0));
        assert!(normal_matrix(&model).abs_diff_eq(Mat3::IDENTITY, 1e-6));
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0));
        // Tangent of the plane x = y, stretched along X.
        let tangent = model.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        let normal = normal_matrix(&model) * Vec3::new(1.0, -1.0, 0.0);
        assert!(tangent.dot(normal).abs() < 1e-5);
    }

    #[test]
    fn singular_model_falls_back_to_identity() {
        let model = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(normal_matrix(&model), Mat3::IDENTITY);
    }

    #[test]
    fn quat_from_axis_degrees_rotates() {
        let q = quat_from_axis_degrees(Vec3::X, 90.0);
        let v = q * Vec3::Y;
        assert!((v - Vec3::Z).length() < 1e-6);
    }
}
