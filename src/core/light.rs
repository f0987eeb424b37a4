use glam::Vec3;

use super::Color;

/// A directional light has a constant direction and does not attenuate with distance.
///
/// The direction is implied by `position` and `target`: light travels from the
/// position toward the target, so moving both keeps the lighting unchanged.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub target: Vec3,
    /// The light’s color.
    pub color: Color,
    /// A scalar multiplier for the light’s strength.
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            color,
            intensity,
        }
    }

    /// Unit vector from a surface toward the light.
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }

    /// The light's color scaled by its intensity.
    pub fn radiance(&self) -> Color {
        self.color.scale(self.intensity)
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        DirectionalLight::new(Vec3::new(5.0, 10.0, 7.5), Color::WHITE, 1.0)
    }
}

/// Blinn-Phong reflection of every light off a surface. No ambient term.
///
/// - `normal`: the surface normal (normalized)
/// - `view_dir`: normalized direction from the fragment to the camera
pub fn blinn_phong(
    normal: Vec3,
    view_dir: Vec3,
    lights: &[DirectionalLight],
    diffuse: Color,
    specular: Color,
    shininess: f32,
) -> Color {
    let mut diffuse_acc = Color::BLACK;
    let mut specular_acc = Color::BLACK;

    for light in lights {
        let light_dir = light.to_light();
        let radiance = light.radiance();

        let diff_factor = normal.dot(light_dir).max(0.0);
        diffuse_acc = diffuse_acc.add(&diffuse.modulate(&radiance).scale(diff_factor));

        let halfway_dir = (light_dir + view_dir).normalize_or_zero();
        let spec_factor = normal.dot(halfway_dir).max(0.0).powf(shininess);
        specular_acc = specular_acc.add(&specular.modulate(&radiance).scale(spec_factor));
    }

    diffuse_acc.clamped().add(&specular_acc.clamped()).clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_points_down_toward_origin() {
        let light = DirectionalLight::default();
        let dir = light.to_light();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.y > 0.0);
        assert!((dir - Vec3::new(5.0, 10.0, 7.5).normalize()).length() < 1e-6);
    }

    #[test]
    fn surfaces_facing_away_receive_nothing() {
        let light = DirectionalLight::new(Vec3::Y * 10.0, Color::WHITE, 1.0);
        let c = blinn_phong(
            -Vec3::Y,
            Vec3::Z,
            &[light],
            Color::RED,
            Color::SPECULAR_GRAY,
            30.0,
        );
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn facing_surface_gets_full_diffuse() {
        let light = DirectionalLight::new(Vec3::Y * 10.0, Color::WHITE, 1.0);
        let c = blinn_phong(Vec3::Y, Vec3::Y, &[light], Color::FOREST_GREEN, Color::BLACK, 30.0);
        assert!((c.g - Color::FOREST_GREEN.g).abs() < 1e-6);
        assert_eq!(c.r, 0.0);
    }
}
