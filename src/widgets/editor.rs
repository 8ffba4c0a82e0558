//! Line editor - emacs-style single-line editing on the bottom row.
//!
//! [`EditSession`] is the state machine: a buffer, a byte cursor, a display
//! cursor and a horizontal scroll offset, advanced one canonical token at a
//! time. [`edit_line`] wraps it in the render → block → apply loop.
//!
//! | Token                 | Effect                                   |
//! |-----------------------|------------------------------------------|
//! | `LEFT` `C-b`          | back one rune                            |
//! | `RIGHT` `C-f`         | forward one rune                         |
//! | `Home` `C-a`          | start of line                            |
//! | `End` `C-e`           | end of line                              |
//! | `DEL` `C-h`           | delete rune before cursor                |
//! | `deletechar` `C-d`    | delete rune at cursor                    |
//! | `C-u`                 | clear the line                           |
//! | `M-b` `M-f`           | back / forward one word                  |
//! | `M-DEL` `M-d`         | delete word backward / forward           |
//! | `RET`                 | submit                                   |
//! | `C-c` `C-g`           | cancel, returning the seed               |
//! | any single rune       | insert                                   |

use tracing::{debug, trace};

use crate::error::Result;
use crate::input::{normalize, InputEvent};
use crate::renderer::{clear_line, print_str, print_str_style};
use crate::terminal::Screen;
use crate::text_measure::{byte_offset_of_rune, is_word_char, rune_width, str_width, trim_columns};
use crate::types::Style;

/// Callback run before each frame with the screen width and height.
pub type RefreshFn<'a, S> = dyn FnMut(&mut S, u16, u16) + 'a;

// =============================================================================
// OBSERVER
// =============================================================================

/// Sees every keystroke the editor handles.
///
/// Called after the token is applied with the resulting buffer. Returning
/// `Some(text)` that differs from the buffer replaces the buffer and moves
/// the cursor to its end.
pub trait KeystrokeObserver {
    fn on_keystroke(&mut self, buffer: &str, token: &str) -> Option<String>;
}

impl<F> KeystrokeObserver for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn on_keystroke(&mut self, buffer: &str, token: &str) -> Option<String> {
        self(buffer, token)
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// What a token did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    Continue,
    Submit,
    Cancel,
}

/// Editing state for one prompt.
///
/// The display cursor is the signed width of the runes between the scroll
/// offset and the byte cursor; [`scroll_into_view`](Self::scroll_into_view)
/// brings it into `[0, window)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditSession {
    buffer: String,
    bufpos: usize,
    cursor: isize,
    offset: usize,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session holding `seed` with the cursor at its end.
    pub fn with_seed(seed: &str) -> Self {
        let mut session = Self {
            buffer: seed.to_string(),
            ..Self::default()
        };
        session.end();
        session
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn into_buffer(self) -> String {
        self.buffer
    }

    /// Byte index of the cursor, always on a char boundary.
    pub fn byte_cursor(&self) -> usize {
        self.bufpos
    }

    /// Cursor column relative to the visible window.
    pub fn display_cursor(&self) -> usize {
        self.cursor.max(0) as usize
    }

    /// Runes hidden off the left edge.
    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// The part of the buffer right of the scroll offset.
    pub fn visible(&self) -> &str {
        trim_columns(&self.buffer, self.offset).0
    }

    /// Apply one canonical token.
    pub fn apply(&mut self, token: &str) -> EditStep {
        match token {
            "LEFT" | "C-b" => self.left(),
            "RIGHT" | "C-f" => self.right(),
            "Home" | "C-a" => self.home(),
            "End" | "C-e" => self.end(),
            "RET" => return EditStep::Submit,
            "C-c" | "C-g" => return EditStep::Cancel,
            "DEL" | "C-h" => self.delete_backward(),
            "deletechar" | "C-d" => self.delete_forward(),
            "C-u" => *self = Self::default(),
            "M-DEL" => self.delete_word_backward(),
            "M-d" => self.delete_word_forward(),
            "M-b" => {
                if self.bufpos > 0 {
                    self.bufpos = backward_word_index(&self.buffer, self.bufpos);
                }
            }
            "M-f" => {
                if self.bufpos < self.buffer.len() {
                    self.bufpos = forward_word_index(&self.buffer, self.bufpos);
                }
            }
            _ => {
                let mut chars = token.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    self.insert(c);
                }
            }
        }
        self.sync_cursor();
        EditStep::Continue
    }

    /// Hand the buffer to `observer` and adopt its replacement, if any.
    pub fn notify(&mut self, observer: &mut dyn KeystrokeObserver, token: &str) {
        if let Some(result) = observer.on_keystroke(&self.buffer, token) {
            if result != self.buffer {
                trace!(%token, "observer replaced buffer");
                self.replace(result);
            }
        }
    }

    /// Swap in new content with the cursor at its end.
    pub fn replace(&mut self, text: String) {
        self.buffer = text;
        self.end();
    }

    /// Shift the scroll offset until the cursor fits in `window` columns.
    pub fn scroll_into_view(&mut self, window: usize) {
        let window = window.max(1) as isize;
        let cursor_rune = self.buffer[..self.bufpos].chars().count();
        if self.offset > cursor_rune {
            self.offset = cursor_rune;
        }
        self.sync_cursor();

        let mut hidden = self.buffer[byte_offset_of_rune(&self.buffer, self.offset)..self.bufpos].chars();
        while self.cursor >= window {
            match hidden.next() {
                Some(c) => {
                    self.offset += 1;
                    self.cursor -= rune_width(c) as isize;
                }
                None => break,
            }
        }
    }

    fn sync_cursor(&mut self) {
        let start = byte_offset_of_rune(&self.buffer, self.offset);
        self.cursor = if start <= self.bufpos {
            str_width(&self.buffer[start..self.bufpos]) as isize
        } else {
            -(str_width(&self.buffer[self.bufpos..start]) as isize)
        };
    }

    fn left(&mut self) {
        if let Some(c) = self.buffer[..self.bufpos].chars().next_back() {
            self.bufpos -= c.len_utf8();
        }
    }

    fn right(&mut self) {
        if let Some(c) = self.buffer[self.bufpos..].chars().next() {
            self.bufpos += c.len_utf8();
        }
    }

    fn home(&mut self) {
        self.bufpos = 0;
        self.offset = 0;
    }

    fn end(&mut self) {
        self.bufpos = self.buffer.len();
        self.offset = 0;
        self.sync_cursor();
    }

    fn insert(&mut self, c: char) {
        self.buffer.insert(self.bufpos, c);
        self.bufpos += c.len_utf8();
    }

    fn delete_backward(&mut self) {
        if let Some(c) = self.buffer[..self.bufpos].chars().next_back() {
            self.bufpos -= c.len_utf8();
            self.buffer.remove(self.bufpos);
        }
    }

    // At the end of the buffer there is nothing to delete; the observer still
    // hears about the key.
    fn delete_forward(&mut self) {
        if self.bufpos < self.buffer.len() {
            self.buffer.remove(self.bufpos);
        }
    }

    fn delete_word_backward(&mut self) {
        if self.bufpos > 0 {
            let to = backward_word_index(&self.buffer, self.bufpos);
            self.buffer.replace_range(to..self.bufpos, "");
            self.bufpos = to;
        }
    }

    fn delete_word_forward(&mut self) {
        if self.bufpos < self.buffer.len() {
            let to = forward_word_index(&self.buffer, self.bufpos);
            self.buffer.replace_range(self.bufpos..to, "");
        }
    }
}

/// Step back one rune, then back over word characters.
fn backward_word_index(buffer: &str, bufpos: usize) -> usize {
    let head = &buffer[..bufpos];
    let mut ret = head.chars().next_back().map_or(0, |c| bufpos - c.len_utf8());
    while let Some(c) = buffer[..ret].chars().next_back() {
        if !is_word_char(c) {
            break;
        }
        ret -= c.len_utf8();
    }
    ret
}

/// Step forward one rune, then forward over word characters.
fn forward_word_index(buffer: &str, bufpos: usize) -> usize {
    let mut ret = buffer[bufpos..]
        .chars()
        .next()
        .map_or(buffer.len(), |c| bufpos + c.len_utf8());
    while let Some(c) = buffer[ret..].chars().next() {
        if !is_word_char(c) {
            break;
        }
        ret += c.len_utf8();
    }
    ret
}

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Edit `seed` on the bottom row behind `"<prompt>: "`.
///
/// Returns the buffer on `RET` and the untouched seed on `C-c`/`C-g`.
/// `refresh` runs before every frame; `observer` sees every handled key,
/// including the one that ends the edit.
pub fn edit_line<S: Screen + ?Sized>(
    screen: &mut S,
    seed: &str,
    prompt: &str,
    mut refresh: Option<&mut RefreshFn<'_, S>>,
    mut observer: Option<&mut dyn KeystrokeObserver>,
) -> Result<String> {
    let mut session = EditSession::with_seed(seed);
    let label = format!("{prompt}: ");
    let label_width = str_width(&label);

    loop {
        let (width, height) = screen.size();
        if let Some(refresh) = refresh.as_deref_mut() {
            refresh(screen, width, height);
        }

        let y = height.saturating_sub(1);
        clear_line(screen, width, y);
        session.scroll_into_view((width as usize).saturating_sub(label_width));
        let col = print_str_style(screen, 0, y, &label, Style::DEFAULT);
        print_str(screen, col, y, session.visible());
        let cursor_x = (label_width + session.display_cursor()).min(u16::MAX as usize) as u16;
        screen.show_cursor(cursor_x, y);
        screen.present()?;

        let InputEvent::Key(key) = screen.poll_event()? else {
            continue;
        };
        let token = normalize(&key);
        trace!(%token, "editor key");

        let step = session.apply(&token);
        if let Some(observer) = observer.as_mut() {
            session.notify(&mut **observer, &token);
        }

        match step {
            EditStep::Continue => {}
            EditStep::Submit => {
                debug!(len = session.buffer().len(), "prompt submitted");
                return Ok(session.into_buffer());
            }
            EditStep::Cancel => {
                debug!(%token, "prompt cancelled");
                return Ok(seed.to_string());
            }
        }
    }
}

/// Read a line from scratch.
pub fn prompt<S: Screen + ?Sized>(
    screen: &mut S,
    prompt: &str,
    refresh: Option<&mut RefreshFn<'_, S>>,
) -> Result<String> {
    edit_line(screen, "", prompt, refresh, None)
}

/// Read a line, telling `callback` about every keystroke.
pub fn prompt_with_callback<S: Screen + ?Sized>(
    screen: &mut S,
    prompt: &str,
    refresh: Option<&mut RefreshFn<'_, S>>,
    callback: &mut dyn FnMut(&str, &str),
) -> Result<String> {
    let mut observer = |buffer: &str, token: &str| -> Option<String> {
        callback(buffer, token);
        None
    };
    edit_line(screen, "", prompt, refresh, Some(&mut observer))
}

/// Read a line; `observer` may rewrite the buffer after every keystroke.
pub fn dynamic_prompt<S: Screen + ?Sized>(
    screen: &mut S,
    prompt: &str,
    refresh: Option<&mut RefreshFn<'_, S>>,
    observer: &mut dyn KeystrokeObserver,
) -> Result<String> {
    edit_line(screen, "", prompt, refresh, Some(observer))
}

/// Edit an existing value.
pub fn edit<S: Screen + ?Sized>(
    screen: &mut S,
    seed: &str,
    prompt: &str,
    refresh: Option<&mut RefreshFn<'_, S>>,
) -> Result<String> {
    edit_line(screen, seed, prompt, refresh, None)
}

// =============================================================================
// TESTS
// =============================================================================
