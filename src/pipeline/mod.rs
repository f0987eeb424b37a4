use crate::core::Color;
use glam::Vec2;

pub mod buffer;
pub mod clipper;
pub mod pipeline;
pub mod rasterizer;

pub use buffer::{Buffer, FrameBuffer, TermBuffer};
pub use clipper::{ClipTriangle, ClipVertex, Clipper};
pub use pipeline::Pipeline;
pub use rasterizer::Rasterizer;

/// One clipped triangle ready for rasterization.
#[derive(Clone, Debug)]
pub struct ProcessedGeometry {
    /// Index into the Scene's entity buffer
    pub entity_id: usize,
    /// Clip space vertices with their world attributes
    pub vertices: [ClipVertex; 3],
}

#[derive(Clone, Debug)]
pub struct Fragment {
    pub screen_pos: Vec2,
    pub depth: f32,
    pub color: Color,
}

impl Default for Fragment {
    fn default() -> Self {
        Self {
            screen_pos: Vec2::ZERO,
            depth: f32::INFINITY,
            color: Color::WHITE,
        }
    }
}
