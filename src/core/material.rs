use std::fmt::{self, Display, Formatter};

use glam::Vec3;

use super::{light::blinn_phong, Color, DirectionalLight, SkyGradient};

/// Which triangle faces of a mesh are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Side {
    /// Counter-clockwise (outward) faces only
    #[default]
    Front,
    /// Clockwise faces only, for viewing a closed mesh from the inside
    Back,
    Double,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Flat color, unaffected by lights.
    Basic { color: Color },
    /// Blinn-Phong lit surface.
    Phong {
        color: Color,
        specular: Color,
        shininess: f32,
    },
    /// Per-pixel vertical gradient of the sky dome.
    SkyGradient(SkyGradient),
}

impl Material {
    pub const DEFAULT_SHININESS: f32 = 30.0;

    pub fn basic(color: Color) -> Self {
        Material::Basic { color }
    }

    pub fn phong(color: Color) -> Self {
        Material::Phong {
            color,
            specular: Color::SPECULAR_GRAY,
            shininess: Self::DEFAULT_SHININESS,
        }
    }

    /// Base color, or the sky's zenith color for gradients.
    pub fn base_color(&self) -> Color {
        match self {
            Material::Basic { color } | Material::Phong { color, .. } => *color,
            Material::SkyGradient(sky) => sky.top,
        }
    }

    /// Color of one fragment.
    ///
    /// `normal` must already face the viewer for the side being drawn.
    pub fn shade(
        &self,
        world_pos: Vec3,
        normal: Vec3,
        eye: Vec3,
        lights: &[DirectionalLight],
    ) -> Color {
        match self {
            Material::Basic { color } => *color,
            Material::Phong {
                color,
                specular,
                shininess,
            } => {
                let view_dir = (eye - world_pos).normalize_or_zero();
                blinn_phong(normal, view_dir, lights, *color, *specular, *shininess)
            }
            Material::SkyGradient(sky) => sky.shade(world_pos),
        }
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Material::Basic { color } => write!(f, "Basic(#{:06X})", color.to_u32()),
            Material::Phong { color, .. } => write!(f, "Phong(#{:06X})", color.to_u32()),
            Material::SkyGradient(_) => write!(f, "SkyGradient"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ignores_lights() {
        let m = Material::basic(Color::GREEN);
        let c = m.shade(Vec3::ZERO, -Vec3::Y, Vec3::Z, &[DirectionalLight::default()]);
        assert_eq!(c, Color::GREEN);
    }

    #[test]
    fn sky_material_uses_world_position() {
        let m = Material::SkyGradient(SkyGradient::default());
        let c = m.shade(Vec3::new(0.0, -33.0, 10.0), Vec3::ZERO, Vec3::ZERO, &[]);
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn display_names_the_model() {
        assert_eq!(Material::phong(Color::FOREST_GREEN).to_string(), "Phong(#008000)");
        assert_eq!(Material::basic(Color::GREEN).to_string(), "Basic(#00FF00)");
    }
}
