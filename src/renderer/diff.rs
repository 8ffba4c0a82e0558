//! Differential renderer.
//!
//! Compares the current frame to the previous one and only emits cells that
//! changed, wrapped in a synchronized update so the terminal never shows a
//! half-drawn frame.
//!
//! 1. Begin synchronized update
//! 2. For each changed cell: move (unless sequential), restyle (if changed), print
//! 3. Place or hide the cursor, end the update, flush once

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::{FrameBuffer, CONTINUATION};
use crate::text_measure::{is_control, rune_width};
use crate::types::{Attr, Cell, Style};

/// Differential renderer.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Forget the previous frame so the next render repaints everything.
    ///
    /// Use this after a resize or a clear of the physical screen.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Render `buffer`, writing only changed cells to `out`.
    ///
    /// Returns true if any cell was written.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        buffer: &FrameBuffer,
        cursor: Option<(u16, u16)>,
    ) -> io::Result<bool> {
        queue!(out, BeginSynchronizedUpdate)?;

        let mut has_changes = false;
        let mut state = CellState::default();
        let width = buffer.width();
        let height = buffer.height();

        for (x, y, cell) in buffer.iter() {
            let changed = match &self.previous {
                Some(prev) if prev.width() == width && prev.height() == height => {
                    prev.get(x, y) != Some(cell)
                }
                _ => true,
            };
            if changed {
                has_changes = true;
                state.render_cell(out, x, y, cell)?;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset))?;
        match cursor {
            Some((x, y)) => queue!(out, MoveTo(x, y), Show)?,
            None => queue!(out, Hide)?,
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }
}

/// Terminal state while writing one frame, to skip redundant escapes.
#[derive(Debug, Default)]
struct CellState {
    last: Option<(u16, u16)>,
    style: Option<Style>,
}

impl CellState {
    fn render_cell<W: Write>(&mut self, out: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // The wide rune to the left already painted this column
        if cell.ch == CONTINUATION {
            self.last = None;
            return Ok(());
        }

        let sequential = matches!(self.last, Some((lx, ly)) if ly == y && lx + 1 == x);
        if !sequential {
            queue!(out, MoveTo(x, y))?;
        }

        if self.style != Some(cell.style) {
            apply_style(out, cell.style)?;
            self.style = Some(cell.style);
        }

        let ch = if is_control(cell.ch) { '\u{fffd}' } else { cell.ch };
        queue!(out, Print(ch))?;

        // After a wide rune the terminal cursor is two columns on
        self.last = if rune_width(ch) == 2 { None } else { Some((x, y)) };
        Ok(())
    }
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    let attrs = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::REVERSE, Attribute::Reverse),
    ];
    for (flag, attribute) in attrs {
        if style.attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    queue!(
        out,
        SetForegroundColor(style.fg.into()),
        SetBackgroundColor(style.bg.into())
    )
}
