use crate::core::Color;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSliceMut;

/// Color + depth target the pipeline rasterizes into.
pub trait Buffer: Send {
    type Pixel: Copy + Send + Sync + PartialEq;

    fn new(width: usize, height: usize) -> Self
    where
        Self: Sized;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Reallocate for a new size. The contents are cleared.
    fn resize(&mut self, width: usize, height: usize);
    fn clear(&mut self);
    fn create_pixel(color: Color) -> Self::Pixel;
    /// Write `pixel` if `depth` is nearer than what is already stored.
    fn set_pixel(&mut self, pos: (usize, usize), depth: &f32, pixel: Self::Pixel);
    fn pixel(&self, pos: (usize, usize)) -> Option<Self::Pixel>;
}

/// Packed `0x00RRGGBB` pixels, the layout minifb presents.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub const CLEAR: u32 = 0;
}

impl Buffer for FrameBuffer {
    type Pixel = u32;

    fn new(width: usize, height: usize) -> Self {
        let buf_size = width * height;
        FrameBuffer {
            width,
            height,
            data: vec![Self::CLEAR; buf_size],
            depth: vec![f32::INFINITY; buf_size],
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    fn clear(&mut self) {
        self.data.par_chunks_mut(1024).for_each(|chunk| {
            chunk.fill(Self::CLEAR);
        });
        self.depth.par_chunks_mut(1024).for_each(|chunk| {
            chunk.fill(f32::INFINITY);
        });
    }

    fn create_pixel(color: Color) -> Self::Pixel {
        color.to_u32()
    }

    fn set_pixel(&mut self, pos: (usize, usize), depth: &f32, pixel: Self::Pixel) {
        if pos.0 < self.width && pos.1 < self.height {
            let index = pos.0 + pos.1 * self.width;
            if *depth < self.depth[index] {
                self.data[index] = pixel;
                self.depth[index] = *depth;
            }
        }
    }

    fn pixel(&self, pos: (usize, usize)) -> Option<Self::Pixel> {
        (pos.0 < self.width && pos.1 < self.height).then(|| self.data[pos.0 + pos.1 * self.width])
    }
}

/// Sub-pixel colors for a terminal.
///
/// Every character cell shows two vertically stacked sub-pixels as an upper
/// half block: the foreground paints the top one, the background the bottom
/// one. A buffer `height` rows tall therefore fills `height.div_ceil(2)` lines.
pub struct TermBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Color>,
    pub depth: Vec<f32>,
}

impl TermBuffer {
    pub const CLEAR: Color = Color::BLACK;
    const HALF_BLOCK: char = '▀';

    /// Terminal lines needed to show the buffer.
    pub fn rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    /// Encode the whole buffer as 24-bit ANSI escapes, starting from the home position.
    pub fn to_ansi(&self) -> String {
        // Keep track of the last color to minimize color changes
        let mut output = String::with_capacity(self.width * self.rows() * 24);
        let mut last_fg = None;
        let mut last_bg = None;

        output.push_str("\x1B[H");
        for row in 0..self.rows() {
            output.push_str(&format!("\x1B[{};1H", row + 1));
            let top_y = row * 2;
            for x in 0..self.width {
                let fg = self.data[x + top_y * self.width];
                let bg = if top_y + 1 < self.height {
                    self.data[x + (top_y + 1) * self.width]
                } else {
                    Self::CLEAR
                };
                if last_fg != Some(fg) {
                    output.push_str(&fg.to_ansi_fg());
                    last_fg = Some(fg);
                }
                if last_bg != Some(bg) {
                    output.push_str(&bg.to_ansi_bg());
                    last_bg = Some(bg);
                }
                output.push(Self::HALF_BLOCK);
            }
        }
        output.push_str("\x1B[0m");
        output
    }
}

impl Buffer for TermBuffer {
    type Pixel = Color;

    fn new(width: usize, height: usize) -> Self {
        TermBuffer {
            width,
            height,
            data: vec![Self::CLEAR; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    fn clear(&mut self) {
        self.data.par_chunks_mut(1024).for_each(|chunk| {
            chunk.fill(Self::CLEAR);
        });
        self.depth.par_chunks_mut(1024).for_each(|chunk| {
            chunk.fill(f32::INFINITY);
        });
    }

    fn create_pixel(color: Color) -> Self::Pixel {
        color
    }

    fn set_pixel(&mut self, pos: (usize, usize), depth: &f32, pixel: Self::Pixel) {
        if pos.0 < self.width && pos.1 < self.height {
            let index = pos.0 + pos.1 * self.width;
            if *depth < self.depth[index] {
                self.data[index] = pixel;
                self.depth[index] = *depth;
            }
        }
    }

    fn pixel(&self, pos: (usize, usize)) -> Option<Self::Pixel> {
        (pos.0 < self.width && pos.1 < self.height).then(|| self.data[pos.0 + pos.1 * self.width])
    }
}
