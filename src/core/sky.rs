use glam::Vec3;

use super::Color;

/// Two-color vertical gradient used to shade the inside of the sky dome.
///
/// `offset` is added to every component of the world position before it is
/// normalized, which moves the horizon of the blend; `exponent` controls how
/// sharply the color leaves `bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub top: Color,
    pub bottom: Color,
    pub offset: f32,
    pub exponent: f32,
}

impl SkyGradient {
    pub const DEFAULT_OFFSET: f32 = 33.0;
    pub const DEFAULT_EXPONENT: f32 = 0.6;

    pub fn new(top: Color, bottom: Color, offset: f32, exponent: f32) -> Self {
        Self {
            top,
            bottom,
            offset,
            exponent,
        }
    }

    /// Blend weight toward `top` for a normalized height `h`.
    pub fn blend_factor(&self, h: f32) -> f32 {
        h.max(0.0).powf(self.exponent).max(0.0)
    }

    /// Normalized height of a world position after applying the offset.
    pub fn height(&self, world_pos: Vec3) -> f32 {
        (world_pos + Vec3::splat(self.offset)).normalize_or_zero().y
    }

    pub fn shade(&self, world_pos: Vec3) -> Color {
        let t = self.blend_factor(self.height(world_pos));
        self.bottom.lerp(&self.top, t)
    }
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self::new(
            Color::SKY_BLUE,
            Color::WHITE,
            Self::DEFAULT_OFFSET,
            Self::DEFAULT_EXPONENT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_height_is_exactly_bottom() {
        let sky = SkyGradient::default();
        // y + offset == 0 puts the normalized height on the horizon
        let at_horizon = Vec3::new(120.0, -33.0, -40.0);
        assert_eq!(sky.height(at_horizon), 0.0);
        assert_eq!(sky.shade(at_horizon), Color::WHITE);
    }

    #[test]
    fn below_horizon_clamps_to_bottom() {
        let sky = SkyGradient::default();
        assert_eq!(sky.shade(Vec3::new(0.0, -500.0, 0.0)), Color::WHITE);
    }

    #[test]
    fn high_points_approach_top() {
        let sky = SkyGradient::default();
        let c = sky.shade(Vec3::new(0.0, 1.0e7, 0.0));
        assert!((c.r - Color::SKY_BLUE.r).abs() < 1e-3);
        assert!((c.g - Color::SKY_BLUE.g).abs() < 1e-3);
        assert!((c.b - Color::SKY_BLUE.b).abs() < 1e-3);
    }

    #[test]
    fn blend_grows_with_height() {
        let sky = SkyGradient::default();
        let low = sky.blend_factor(0.1);
        let mid = sky.blend_factor(0.5);
        let high = sky.blend_factor(0.9);
        assert!(low < mid && mid < high);
        assert_eq!(sky.blend_factor(0.0), 0.0);
        assert_eq!(sky.blend_factor(-0.3), 0.0);
    }
}
