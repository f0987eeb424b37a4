use std::io::{self, stdout, Write};
use std::panic;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::SetBackgroundColor,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};

use super::{HostEvent, Surface};
use crate::{core::Color, error::RenderError, pipeline::TermBuffer};

/// Raw-mode alternate screen drawn with half-block characters.
///
/// Each terminal row holds two buffer rows, so the reported size is
/// `(columns, rows * 2)`. The terminal is restored on drop and on panic.
pub struct TerminalSurface {
    size: (usize, usize),
    open: bool,
}

impl TerminalSurface {
    pub fn new() -> Result<Self, RenderError> {
        // Set up panic hook for terminal cleanup
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = Self::restore_terminal();
            error!("Panic occurred: {}", panic_info);
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let (cols, rows) = or_restore(Self::enter_screen, Self::restore_terminal)?;
        let size = cell_to_buffer_size(cols, rows);
        info!("Terminal surface {}x{} cells", cols, rows);
        Ok(Self { size, open: true })
    }

    fn enter_screen() -> io::Result<(u16, u16)> {
        execute!(
            stdout(),
            EnterAlternateScreen,
            Hide,
            SetBackgroundColor(Color::BLACK.to_crossterm_color()),
        )?;
        terminal::size()
    }

    fn restore_terminal() -> io::Result<()> {
        disable_raw_mode()?;
        execute!(stdout(), Show, LeaveAlternateScreen)?;
        Ok(())
    }

    fn is_close_key(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
            KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
    }
}

/// Run `setup` once raw mode is on. If it fails no `TerminalSurface` exists
/// to clean up on drop, so `restore` runs before the error is returned.
fn or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    setup().inspect_err(|e| {
        error!("Terminal setup failed: {}", e);
        let _ = restore();
    })
}

/// Buffer pixels covered by a `cols` x `rows` cell grid.
pub fn cell_to_buffer_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize, rows as usize * 2)
}

impl Surface for TerminalSurface {
    type Target = TermBuffer;

    fn size(&self) -> (usize, usize) {
        self.size
    }

    fn poll_events(&mut self) -> Result<Vec<HostEvent>, RenderError> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Resize(cols, rows) => {
                    let (width, height) = cell_to_buffer_size(cols, rows);
                    self.size = (width, height);
                    events.push(HostEvent::Resized { width, height });
                }
                Event::Key(key) if key.kind == KeyEventKind::Press && Self::is_close_key(&key) => {
                    self.open = false;
                    events.push(HostEvent::CloseRequested);
                }
                _ => {}
            }
        }
        Ok(events)
    }

    fn present(&mut self, buffer: &TermBuffer) -> Result<(), RenderError> {
        let mut out = stdout().lock();
        out.write_all(buffer.to_ansi().as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = Self::restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_cell_holds_two_buffer_rows() {
        assert_eq!(cell_to_buffer_size(80, 24), (80, 48));
        assert_eq!(cell_to_buffer_size(1, 0), (1, 0));
    }

    #[test]
    fn failed_setup_restores_the_terminal() {
        let mut restored = false;
        let result: io::Result<(u16, u16)> = or_restore(
            || Err(io::Error::other("no tty")),
            || {
                restored = true;
                Ok(())
            },
        );
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn successful_setup_leaves_the_terminal_alone() {
        let mut restored = false;
        let result = or_restore(
            || Ok((80u16, 24u16)),
            || {
                restored = true;
                Ok(())
            },
        );
        assert_eq!(result.unwrap(), (80, 24));
        assert!(!restored);
    }

    #[test]
    fn close_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(TerminalSurface::is_close_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(TerminalSurface::is_close_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(TerminalSurface::is_close_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!TerminalSurface::is_close_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!TerminalSurface::is_close_key(&key(KeyCode::Char('w'), KeyModifiers::NONE)));
    }
}
