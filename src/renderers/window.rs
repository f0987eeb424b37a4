use log::{debug, info};
use minifb::{Key, Scale, Window, WindowOptions};

use super::{HostEvent, Surface};
use crate::{error::RenderError, pipeline::FrameBuffer};

/// A resizable desktop window backed by minifb.
pub struct WindowSurface {
    window: Window,
    size: (usize, usize),
    open: bool,
}

impl WindowSurface {
    pub const TITLE: &'static str = "Garden Renderer";

    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let window = Window::new(
            Self::TITLE,
            width,
            height,
            WindowOptions {
                resize: true,
                scale: Scale::X1,
                ..WindowOptions::default()
            },
        )?;
        let size = window.get_size();
        info!("Opened window {}x{}", size.0, size.1);
        Ok(Self {
            window,
            size,
            open: true,
        })
    }
}

impl Surface for WindowSurface {
    type Target = FrameBuffer;

    fn size(&self) -> (usize, usize) {
        self.size
    }

    fn poll_events(&mut self) -> Result<Vec<HostEvent>, RenderError> {
        let mut events = Vec::new();

        let size = self.window.get_size();
        if size != self.size {
            debug!("Window size {:?} -> {:?}", self.size, size);
            self.size = size;
            events.push(HostEvent::Resized {
                width: size.0,
                height: size.1,
            });
        }

        if self.open && (!self.window.is_open() || self.window.is_key_down(Key::Escape)) {
            self.open = false;
            events.push(HostEvent::CloseRequested);
        }
        Ok(events)
    }

    fn present(&mut self, buffer: &FrameBuffer) -> Result<(), RenderError> {
        self.window
            .update_with_buffer(&buffer.data, buffer.width, buffer.height)?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open && self.window.is_open()
    }
}
