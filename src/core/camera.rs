use glam::{Mat4, Vec3};

/// Perspective camera.
///
/// The projection matrix is cached; anything that changes `fov`, `aspect_ratio`,
/// `near` or `far` must be followed by [`Camera::update_projection_matrix`].
/// [`Camera::set_aspect`] does both.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position of the camera
    pub pos: Vec3,
    /// The direction the camera is facing
    pub facing: Vec3,
    /// The Up Vector of the camera
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// The aspect ratio of the camera (width / height)
    pub aspect_ratio: f32,
    /// The near plane of the camera, anything closer than this will not be rendered
    pub near: f32,
    /// The far plane of the camera, anything beyond this will not be rendered
    pub far: f32,

    projection_matrix: Mat4,
}

impl Camera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut out = Self {
            pos: Vec3::ZERO,
            facing: Vec3::NEG_Z,
            up: Vec3::Y,
            fov,
            aspect_ratio,
            near,
            far,
            projection_matrix: Mat4::IDENTITY,
        };
        out.update_projection_matrix();
        out
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }

    pub fn forward(&self) -> Vec3 {
        self.facing.normalize()
    }

    /// Set the aspect ratio from surface dimensions and refresh the projection.
    pub fn set_aspect(&mut self, width: usize, height: usize) {
        self.aspect_ratio = width as f32 / height as f32;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix =
            Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect_ratio, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.pos, self.forward(), self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(75.0, 1.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn set_aspect_refreshes_cached_projection() {
        let mut cam = Camera::default();
        let before = cam.projection_matrix();
        cam.set_aspect(1600, 900);
        assert_eq!(cam.aspect_ratio, 1600.0 / 900.0);
        assert_ne!(cam.projection_matrix(), before);

        let expected = Mat4::perspective_rh_gl(75f32.to_radians(), 1600.0 / 900.0, 0.1, 1000.0);
        assert_eq!(cam.projection_matrix(), expected);
    }

    #[test]
    fn point_ahead_of_camera_projects_to_center() {
        let mut cam = Camera::default();
        cam.set_position(Vec3::new(0.0, 5.0, 15.0));
        let clip = cam.view_projection() * Vec4::new(0.0, 5.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }
}
