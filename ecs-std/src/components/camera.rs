use glam::{Mat4, UVec2, Vec2, Vec3};
use orbit_core::math::{look_at_rh, perspective_rh};

use super::pointer::ButtonSet;
use orbit_core::input::MouseButton;

/// Orbit viewer: a camera parametrized by focus point, distance and angles.
///
/// Angles are in radians. At `azimuth = 0, elevation = 0` the eye sits on
/// the focus' +Z side looking toward -Z. Pointer deltas fed to the
/// operations are fractions of the viewport (a full-width drag is `1.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    /// The point the camera orbits around.
    pub focus: Vec3,
    /// Distance from the focus.
    pub distance: f32,
    /// Horizontal angle around the world Y axis.
    pub azimuth: f32,
    /// Vertical angle above the horizontal plane.
    pub elevation: f32,
    /// Radians of rotation per unit of fractional drag.
    pub rotate_sensitivity: f32,
    /// Relative distance change per unit of fractional drag.
    pub zoom_sensitivity: f32,
    /// Focus travel, in multiples of the distance, per unit of fractional drag.
    pub pan_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Lower elevation clamp, short of the pole.
    pub min_elevation: f32,
    /// Upper elevation clamp, short of the pole.
    pub max_elevation: f32,
}

impl Viewer {
    /// Elevation clamp magnitude; keeps the view direction off the world up axis.
    pub const POLE_MARGIN: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    pub fn new(focus: Vec3, distance: f32) -> Self {
        Self {
            focus,
            distance,
            azimuth: 0.0,
            elevation: 0.3,
            rotate_sensitivity: std::f32::consts::PI,
            zoom_sensitivity: 1.0,
            pan_sensitivity: 1.0,
            min_distance: 0.5,
            max_distance: 100.0,
            min_elevation: -Self::POLE_MARGIN,
            max_elevation: Self::POLE_MARGIN,
        }
    }

    pub fn with_angles(mut self, azimuth: f32, elevation: f32) -> Self {
        self.azimuth = azimuth;
        self.elevation = elevation.clamp(self.min_elevation, self.max_elevation);
        self
    }

    pub fn with_distance_range(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.distance = self.distance.clamp(min, max);
        self
    }

    /// Pull distance and elevation back inside their configured ranges.
    pub fn clamped(mut self) -> Self {
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.elevation = self.elevation.clamp(self.min_elevation, self.max_elevation);
        self
    }

    pub fn with_sensitivity(mut self, rotate: f32, zoom: f32, pan: f32) -> Self {
        self.rotate_sensitivity = rotate;
        self.zoom_sensitivity = zoom;
        self.pan_sensitivity = pan;
        self
    }

    /// Orbit around the focus. Horizontal drag turns azimuth, vertical drag
    /// tilts elevation.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.rotate_sensitivity;
        self.elevation = (self.elevation + dy * self.rotate_sensitivity)
            .clamp(self.min_elevation, self.max_elevation);
    }

    /// Change distance in proportion to the vertical drag. Dragging down
    /// backs away from the focus.
    pub fn zoom(&mut self, dy: f32) {
        let scaled = self.distance + dy * self.zoom_sensitivity * self.distance;
        self.distance = scaled.clamp(self.min_distance, self.max_distance);
    }

    /// Pan the focus in the view plane.
    ///
    /// With `lock_to_view` the focus moves along the camera's right and up
    /// axes; otherwise along world X and world Y.
    pub fn translate(&mut self, dx: f32, dy: f32, lock_to_view: bool) {
        let scale = self.distance * self.pan_sensitivity;
        let (right, up) = if lock_to_view {
            (self.right(), self.up())
        } else {
            (Vec3::X, Vec3::Y)
        };
        self.focus += (right * -dx + up * dy) * scale;
    }

    /// Eye position from the spherical coordinates.
    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        self.focus + Vec3::new(ce * sa, se, ce * ca) * self.distance
    }

    /// Unit vector from the eye toward the focus.
    pub fn forward(&self) -> Vec3 {
        (self.focus - self.eye()).normalize_or_zero()
    }

    /// Camera right axis (horizontal, perpendicular to forward).
    pub fn right(&self) -> Vec3 {
        let (sa, ca) = self.azimuth.sin_cos();
        Vec3::new(ca, 0.0, -sa)
    }

    /// Camera up axis.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at_rh(self.eye(), self.focus, Vec3::Y)
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 5.0)
    }
}

/// New viewer state for a drag that started at `anchor`.
///
/// `delta` is the fractional pointer travel since the anchor was taken.
/// Left rotates, Right zooms, Middle pans locked to the view. Several held
/// buttons apply in that order.
pub fn update_viewer(anchor: &Viewer, delta: Vec2, held: ButtonSet) -> Viewer {
    let mut viewer = *anchor;
    if held.contains(MouseButton::Left) {
        viewer.rotate(delta.x, delta.y);
    }
    if held.contains(MouseButton::Right) {
        viewer.zoom(delta.y);
    }
    if held.contains(MouseButton::Middle) {
        viewer.translate(delta.x, delta.y, true);
    }
    viewer
}

/// Projection parameters and initial framing, usually filled from the CLI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub viewer: Viewer,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            viewer: Viewer::default(),
        }
    }
}

/// The scene camera resource: viewport, projection, viewer and drag anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    viewport: UVec2,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub viewer: Viewer,
    /// Viewer snapshot taken at the last pointer button transition.
    pub anchor: Viewer,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(settings: &CameraSettings, viewport: UVec2) -> Self {
        let viewer = settings.viewer.clamped();
        let mut camera = Self {
            viewport: viewport.max(UVec2::ONE),
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            viewer,
            anchor: viewer,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.recompute_matrices();
        camera
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Update the viewport size. Zero extents (minimized window) are ignored.
    ///
    /// Returns whether the size changed.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        let size = UVec2::new(width, height);
        if width == 0 || height == 0 || size == self.viewport {
            return false;
        }
        self.viewport = size;
        true
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.x as f32 / self.viewport.y as f32
    }

    /// Snapshot the viewer as the new drag anchor.
    pub fn snapshot_anchor(&mut self) {
        self.anchor = self.viewer;
    }

    /// Rebuild view and projection from the viewer and viewport.
    pub fn recompute_matrices(&mut self) {
        self.view = self.viewer.view_matrix();
        self.projection = perspective_rh(self.fov, self.aspect_ratio(), self.near, self.far);
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn eye(&self) -> Vec3 {
        self.viewer.eye()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(&CameraSettings::default(), UVec2::new(800, 600))
    }

    #[test]
    fn zero_rotation_leaves_view_unchanged() {
        let mut camera = camera();
        let before = camera.view();
        camera.viewer.rotate(0.0, 0.0);
        camera.recompute_matrices();
        assert_eq!(camera.view(), before);
    }

    #[test]
    fn eye_at_zero_angles_is_on_plus_z() {
        let viewer = Viewer::new(Vec3::ZERO, 10.0).with_angles(0.0, 0.0);
        assert!((viewer.eye() - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
        assert!((viewer.forward() - Vec3::NEG_Z).length() < 1e-5);
        assert!((viewer.right() - Vec3::X).length() < 1e-5);
        assert!((viewer.up() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn rotate_clamps_elevation_short_of_pole() {
        let mut viewer = Viewer::default();
        viewer.rotate(0.0, 100.0);
        assert_eq!(viewer.elevation, viewer.max_elevation);
        assert!(viewer.elevation < std::f32::consts::FRAC_PI_2);
        viewer.rotate(0.0, -200.0);
        assert_eq!(viewer.elevation, viewer.min_elevation);
    }

    #[test]
    fn horizontal_drag_changes_only_azimuth() {
        let mut viewer = Viewer::default();
        let elevation = viewer.elevation;
        viewer.rotate(0.25, 0.0);
        assert!((viewer.azimuth + 0.25 * std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(viewer.elevation, elevation);
        assert!(((viewer.eye() - viewer.focus).length() - viewer.distance).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_settings_are_clamped_at_construction() {
        let mut viewer = Viewer::new(Vec3::ZERO, 500.0);
        viewer.elevation = 3.0;
        let settings = CameraSettings {
            viewer,
            ..CameraSettings::default()
        };
        let camera = Camera::new(&settings, UVec2::new(800, 600));

        assert_eq!(camera.viewer.distance, camera.viewer.max_distance);
        assert_eq!(camera.viewer.elevation, camera.viewer.max_elevation);
        assert_eq!(camera.anchor, camera.viewer);
    }

    #[test]
    fn zoom_is_proportional_and_clamped() {
        let mut viewer = Viewer::new(Vec3::ZERO, 4.0);
        viewer.zoom(0.5);
        assert!((viewer.distance - 6.0).abs() < 1e-5);
        viewer.zoom(-0.5);
        assert!((viewer.distance - 3.0).abs() < 1e-5);
        viewer.zoom(-10.0);
        assert_eq!(viewer.distance, viewer.min_distance);
        viewer.zoom(1e6);
        assert_eq!(viewer.distance, viewer.max_distance);
    }

    #[test]
    fn translate_locked_follows_camera_axes() {
        let mut viewer = Viewer::new(Vec3::ZERO, 2.0).with_angles(std::f32::consts::FRAC_PI_2, 0.0);
        // Looking down -X: camera right is -Z.
        viewer.translate(-0.5, 0.0, true);
        assert!((viewer.focus - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn translate_unlocked_uses_world_axes() {
        let mut viewer = Viewer::new(Vec3::ZERO, 2.0).with_angles(std::f32::consts::FRAC_PI_2, 0.0);
        viewer.translate(-0.5, 0.25, false);
        assert!((viewer.focus - Vec3::new(1.0, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn update_viewer_is_pure_and_dispatches_by_button() {
        let anchor = Viewer::default();
        let delta = Vec2::new(0.1, 0.2);

        let none = update_viewer(&anchor, delta, ButtonSet::EMPTY);
        assert_eq!(none, anchor);

        let rotated = update_viewer(&anchor, delta, ButtonSet::from(MouseButton::Left));
        let mut expected = anchor;
        expected.rotate(0.1, 0.2);
        assert_eq!(rotated, expected);

        let zoomed = update_viewer(&anchor, delta, ButtonSet::from(MouseButton::Right));
        assert_eq!(zoomed.focus, anchor.focus);
        assert!(zoomed.distance > anchor.distance);

        let panned = update_viewer(&anchor, delta, ButtonSet::from(MouseButton::Middle));
        assert_eq!(panned.distance, anchor.distance);
        assert_ne!(panned.focus, anchor.focus);

        // Same inputs, same output.
        assert_eq!(update_viewer(&anchor, delta, ButtonSet::from(MouseButton::Left)), rotated);
    }

    #[test]
    fn viewport_ignores_zero_extent() {
        let mut camera = camera();
        assert!(!camera.set_viewport(0, 600));
        assert!(!camera.set_viewport(800, 0));
        assert_eq!(camera.viewport(), UVec2::new(800, 600));
        assert!(camera.set_viewport(1024, 512));
        assert!((camera.aspect_ratio() - 2.0).abs() < 1e-6);
        assert!(!camera.set_viewport(1024, 512));
    }

    #[test]
    fn projection_tracks_aspect() {
        let mut camera = camera();
        let before = camera.projection();
        camera.set_viewport(600, 600);
        camera.recompute_matrices();
        assert_ne!(camera.projection(), before);
        assert!((camera.projection().x_axis.x - camera.projection().y_axis.y).abs() < 1e-5);
    }

    #[test]
    fn snapshot_anchor_copies_viewer() {
        let mut camera = camera();
        camera.viewer.rotate(0.3, 0.1);
        assert_ne!(camera.anchor, camera.viewer);
        camera.snapshot_anchor();
        assert_eq!(camera.anchor, camera.viewer);
    }
}
