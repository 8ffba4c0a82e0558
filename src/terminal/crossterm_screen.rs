//! Real terminal backend.
//!
//! Enters raw mode and the alternate screen on creation and restores both on
//! drop. Cell writes land in a [`FrameBuffer`]; [`present`](Screen::present)
//! hands it to a [`DiffRenderer`] so only changed cells reach the terminal.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use tracing::{debug, warn};

use super::Screen;
use crate::error::Result;
use crate::input::{read_event, InputEvent};
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::types::Style;

/// Terminal screen backed by crossterm.
pub struct CrosstermScreen {
    out: Stdout,
    buffer: FrameBuffer,
    renderer: DiffRenderer,
    cursor: Option<(u16, u16)>,
    active: bool,
}

impl CrosstermScreen {
    /// Take over the terminal.
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let mut out = io::stdout();

        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }
        debug!(width, height, "terminal entered raw mode");

        Ok(Self {
            out,
            buffer: FrameBuffer::new(width, height),
            renderer: DiffRenderer::new(),
            cursor: None,
            active: true,
        })
    }

    /// Give the terminal back. Called by `Drop` as well.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        debug!("terminal restored");
        Ok(())
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.buffer.resize(width, height);
        self.renderer.invalidate();
        execute!(self.out, Clear(ClearType::All))
    }
}

impl Screen for CrosstermScreen {
    fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        self.buffer.set(x, y, ch, style);
    }

    fn show_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn present(&mut self) -> Result<()> {
        self.renderer.render(&mut self.out, &self.buffer, self.cursor)?;
        self.out.flush()?;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<InputEvent> {
        let event = read_event()?;
        if let InputEvent::Resize(width, height) = event {
            self.handle_resize(width, height)?;
        }
        Ok(event)
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "failed to restore terminal");
        }
    }
}
