use std::f32::consts::TAU;

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Position and Euler orientation (XYZ order, radians) of an entity.
///
/// The model matrix is rebuilt eagerly on every mutation so it can be read
/// through a shared reference while the rasterizer runs.
#[derive(Debug, Clone)]
pub struct Transform {
    pos: Vec3,
    rot: Vec3,
    model_mat: Mat4,
}

impl Transform {
    pub fn new() -> Self {
        Self::from_position(Vec3::ZERO)
    }

    pub fn from_position(pos: Vec3) -> Self {
        let mut out = Transform {
            pos,
            rot: Vec3::ZERO,
            model_mat: Mat4::IDENTITY,
        };
        out.update_model_mat();
        out
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }

    /// Euler angles about X, Y and Z, each kept in `[0, 2π)`.
    pub fn rotation(&self) -> Vec3 {
        self.rot
    }

    pub fn model_mat(&self) -> Mat4 {
        self.model_mat
    }

    /// Matrix for carrying model space normals into world space.
    pub fn normal_mat(&self) -> Mat3 {
        Mat3::from_mat4(self.model_mat).inverse().transpose()
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rot.x, self.rot.y, self.rot.z)
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.pos = pos;
        self.update_model_mat();
    }

    /// Replace the Euler angles outright.
    pub fn set_rotation(&mut self, rot: Vec3) {
        self.rot = wrap_angles(rot);
        self.update_model_mat();
    }

    /// Add to the Euler angles (in radians).
    pub fn rotate_euler(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.rot = wrap_angles(self.rot + Vec3::new(pitch, yaw, roll));
        self.update_model_mat();
    }

    fn update_model_mat(&mut self) {
        self.model_mat =
            Mat4::from_rotation_translation(self.orientation(), self.pos);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

fn wrap_angles(rot: Vec3) -> Vec3 {
    Vec3::new(rot.x.rem_euclid(TAU), rot.y.rem_euclid(TAU), rot.z.rem_euclid(TAU))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn translation_lands_in_model_matrix() {
        let t = Transform::from_position(Vec3::new(1.0, 0.5, -2.0));
        let p = t.model_mat().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 0.5, -2.0)).length() < 1e-6);
    }

    #[test]
    fn angles_wrap_past_full_turn() {
        let mut t = Transform::new();
        t.rotate_euler(TAU + 0.25, -0.25, 0.0);
        let r = t.rotation();
        assert!((r.x - 0.25).abs() < 1e-5);
        assert!((r.y - (TAU - 0.25)).abs() < 1e-5);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn quarter_turn_about_x_lays_plane_flat() {
        let mut t = Transform::new();
        t.set_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0));
        let n = (t.normal_mat() * Vec3::Z).normalize();
        assert!((n - Vec3::Y).length() < 1e-5);
    }
}
