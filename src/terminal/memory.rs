//! In-memory screen with a scripted event queue.
//!
//! Drives widgets without a terminal: queue events up front, run the
//! widget, then read back what it drew. When the script runs dry,
//! `poll_event` fails with `UnexpectedEof` so a widget that never finishes
//! returns an error instead of hanging.

use std::collections::VecDeque;
use std::io;

use super::Screen;
use crate::error::Result;
use crate::input::{InputEvent, KeyEvent};
use crate::renderer::FrameBuffer;
use crate::types::{Cell, Style};

#[derive(Debug, Clone)]
pub struct MemoryScreen {
    buffer: FrameBuffer,
    events: VecDeque<InputEvent>,
    cursor: Option<(u16, u16)>,
    presents: usize,
}

impl MemoryScreen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height),
            events: VecDeque::new(),
            cursor: None,
            presents: 0,
        }
    }

    pub fn push_event(&mut self, event: InputEvent) -> &mut Self {
        self.events.push_back(event);
        self
    }

    pub fn push_key(&mut self, key: KeyEvent) -> &mut Self {
        self.push_event(InputEvent::Key(key))
    }

    /// Queue key events for canonical tokens (`"C-a"`, `"LEFT"`, `"x"`).
    ///
    /// # Panics
    ///
    /// Panics on a string that is not a canonical token.
    pub fn push_tokens(&mut self, tokens: &[&str]) -> &mut Self {
        for token in tokens {
            let key = KeyEvent::from_token(token)
                .unwrap_or_else(|| panic!("not a canonical key token: {token:?}"));
            self.push_key(key);
        }
        self
    }

    /// Queue key events for canonical tokens, or nothing at all when any
    /// token is not canonical.
    pub fn try_push_tokens(&mut self, tokens: &[&str]) -> Option<&mut Self> {
        let keys = tokens
            .iter()
            .map(|token| KeyEvent::from_token(token))
            .collect::<Option<Vec<_>>>()?;
        for key in keys {
            self.push_key(key);
        }
        Some(self)
    }

    /// Queue one rune event per character of `text`.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.push_key(KeyEvent::rune(c));
        }
        self
    }

    /// Queue a resize; the grid changes size when the event is polled.
    pub fn push_resize(&mut self, width: u16, height: u16) -> &mut Self {
        self.push_event(InputEvent::Resize(width, height))
    }

    /// Events not yet consumed.
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Number of `present` calls so far.
    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer.get(x, y)
    }

    /// Drawn text of row `y`, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        self.buffer.row_text(y)
    }

    /// Drawn text of the bottom row.
    pub fn last_row_text(&self) -> String {
        self.buffer.row_text(self.buffer.height().saturating_sub(1))
    }
}

impl Screen for MemoryScreen {
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
        self.presents += 1;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<InputEvent> {
        let event = self.events.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
        })?;
        if let InputEvent::Resize(width, height) = event {
            self.buffer.resize(width, height);
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_events_in_order() {
        let mut screen = MemoryScreen::new(10, 3);
        screen.push_tokens(&["C-a", "x"]).type_text("yz");
        assert_eq!(screen.pending(), 4);
        assert_eq!(screen.poll_event().unwrap().token().as_deref(), Some("C-a"));
        assert_eq!(screen.poll_event().unwrap().token().as_deref(), Some("x"));
        assert_eq!(screen.poll_event().unwrap().token().as_deref(), Some("y"));
        assert_eq!(screen.poll_event().unwrap().token().as_deref(), Some("z"));
    }

    #[test]
    fn test_try_push_tokens_rejects_whole_script() {
        let mut screen = MemoryScreen::new(10, 3);
        assert!(screen.try_push_tokens(&["C-a", "not-a-key"]).is_none());
        assert_eq!(screen.pending(), 0);
        assert!(screen.try_push_tokens(&["C-a", "M-DEL", "x"]).is_some());
        assert_eq!(screen.pending(), 3);
    }

    #[test]
    #[should_panic(expected = "not a canonical key token")]
    fn test_push_tokens_panics_on_bad_token() {
        MemoryScreen::new(10, 3).push_tokens(&["Ctrl+A"]);
    }

    #[test]
    fn test_exhausted_script_errors() {
        let mut screen = MemoryScreen::new(10, 3);
        match screen.poll_event() {
            Err(Error::Terminal { source }) => assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected eof, got {other:?}"),
        }
    }

    #[test]
    fn test_resize_applies_on_poll() {
        let mut screen = MemoryScreen::new(10, 3);
        screen.push_resize(20, 5);
        assert_eq!(screen.size(), (10, 3));
        screen.poll_event().unwrap();
        assert_eq!(screen.size(), (20, 5));
    }

    #[test]
    fn test_drawing_and_cursor() {
        let mut screen = MemoryScreen::new(10, 3);
        screen.set_cell(0, 2, 'o', Style::DEFAULT);
        screen.set_cell(1, 2, 'k', Style::DEFAULT);
        screen.show_cursor(2, 2);
        screen.present().unwrap();
        assert_eq!(screen.last_row_text(), "ok");
        assert_eq!(screen.cursor(), Some((2, 2)));
        assert_eq!(screen.presents(), 1);
        screen.hide_cursor();
        screen.clear();
        assert_eq!(screen.cursor(), None);
        assert_eq!(screen.row_text(2), "");
    }
}
