//! Host surfaces the finished frames are shown on.

use crate::{error::RenderError, pipeline::Buffer};

pub mod terminal;
pub mod window;

pub use terminal::TerminalSurface;
pub use window::WindowSurface;

/// Something the host tells the loop between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The drawable area changed; sizes are in buffer pixels
    Resized { width: usize, height: usize },
    CloseRequested,
}

/// A place to show frames: a desktop window, a terminal, or an offscreen target.
pub trait Surface {
    /// The buffer layout this surface presents.
    type Target: Buffer;

    /// Current drawable size in buffer pixels.
    fn size(&self) -> (usize, usize);
    /// Drain everything that happened since the last poll.
    fn poll_events(&mut self) -> Result<Vec<HostEvent>, RenderError>;
    fn present(&mut self, buffer: &Self::Target) -> Result<(), RenderError>;
    fn is_open(&self) -> bool;
}
