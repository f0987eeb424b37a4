#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32, // Red component (0.0 - 1.0)
    pub g: f32, // Green component (0.0 - 1.0)
    pub b: f32, // Blue component (0.0 - 1.0)
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value. Bits above the low 24 are ignored.
    pub const fn from_u32(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xFF) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xFF) as f32 / 255.0;
        let b = (rgb & 0xFF) as f32 / 255.0;
        Self { r, g, b }
    }

    pub fn to_crossterm_color(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: channel_to_u8(self.r),
            g: channel_to_u8(self.g),
            b: channel_to_u8(self.b),
        }
    }

    /// Truecolor escape that sets the foreground.
    pub fn to_ansi_fg(&self) -> String {
        format!(
            "\x1b[38;2;{};{};{}m",
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b)
        )
    }

    /// Truecolor escape that sets the background.
    pub fn to_ansi_bg(&self) -> String {
        format!(
            "\x1b[48;2;{};{};{}m",
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b)
        )
    }

    pub fn to_u32(&self) -> u32 {
        let r = channel_to_u8(self.r) as u32;
        let g = channel_to_u8(self.g) as u32;
        let b = channel_to_u8(self.b) as u32;
        (r << 16) | (g << 8) | b
    }

    pub fn lerp(&self, end: &Color, t: f32) -> Color {
        Color {
            r: self.r + (end.r - self.r) * t,
            g: self.g + (end.g - self.g) * t,
            b: self.b + (end.b - self.b) * t,
        }
    }

    /// Component-wise product, used to tint a surface color by a light color.
    pub fn modulate(&self, other: &Color) -> Color {
        Color::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn scale(&self, factor: f32) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn add(&self, other: &Color) -> Color {
        Color::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    pub fn clamped(&self) -> Color {
        Color::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::from_u32(0x000000);
    pub const WHITE: Color = Color::from_u32(0xFFFFFF);
    pub const RED: Color = Color::from_u32(0xFF0000);
    pub const GREEN: Color = Color::from_u32(0x00FF00);
    pub const BLUE: Color = Color::from_u32(0x0000FF);
    /// Zenith color of the sky dome.
    pub const SKY_BLUE: Color = Color::from_u32(0x0077FF);
    /// Foliage color of the cone trees.
    pub const FOREST_GREEN: Color = Color::from_u32(0x008000);
    /// Default Phong specular tint.
    pub const SPECULAR_GRAY: Color = Color::from_u32(0x111111);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE // Default to white color
    }
}
