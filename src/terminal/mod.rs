//! Terminal abstraction.
//!
//! Widgets draw through the [`Screen`] trait and block on
//! [`Screen::poll_event`]. Two backends ship with the crate:
//!
//! - [`CrosstermScreen`] - a real terminal (raw mode, alternate screen)
//! - [`MemoryScreen`] - an in-memory grid fed from a scripted event queue

mod crossterm_screen;
mod memory;

pub use crossterm_screen::CrosstermScreen;
pub use memory::MemoryScreen;

use crate::error::Result;
use crate::input::InputEvent;
use crate::types::Style;

/// Cell-addressed drawing plus a blocking event stream.
pub trait Screen {
    /// Width and height in cells.
    fn size(&self) -> (u16, u16);

    /// Write one rune. Out-of-range coordinates are ignored.
    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style);

    fn show_cursor(&mut self, x: u16, y: u16);

    fn hide_cursor(&mut self);

    /// Blank every cell.
    fn clear(&mut self);

    /// Flush pending cell writes to the physical terminal.
    fn present(&mut self) -> Result<()>;

    /// Block until the next input event.
    fn poll_event(&mut self) -> Result<InputEvent>;
}
