//! Single-choice menu.
//!
//! Title on row 0, choices from row 1, a `>` beside the selection. The
//! window follows the selection in jumps of `menu_scroll_step` rows rather
//! than one row at a time.

use tracing::{debug, trace};

use crate::config::config;
use crate::error::Result;
use crate::input::{normalize, InputEvent};
use crate::renderer::print_str;
use crate::terminal::Screen;
use crate::text_measure::trim_columns;

/// Overlay drawn after the menu: `(screen, selection, width, height)`.
pub type OverlayFn<'a, S> = dyn FnMut(&mut S, usize, u16, u16) + 'a;

/// What a token did to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    Continue,
    Select(usize),
    Cancel,
}

/// Selection, window offset and horizontal shift of a menu over `len` choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    len: usize,
    selection: usize,
    offset: usize,
    shift: usize,
    scroll_step: usize,
    page_margin: usize,
}

impl MenuState {
    /// Menu over `len` choices starting at `default`, or 0 when `default` is
    /// out of range.
    pub fn new(len: usize, default: usize) -> Self {
        let config = config();
        Self {
            len,
            selection: if default < len { default } else { 0 },
            offset: 0,
            shift: 0,
            scroll_step: config.menu_scroll_step.max(1),
            page_margin: config.menu_page_margin,
        }
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    /// First choice shown in the window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Runes trimmed off the left of every label.
    pub fn shift(&self) -> usize {
        self.shift
    }

    fn last(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Apply one canonical token. `height` sizes page jumps.
    pub fn apply(&mut self, token: &str, height: u16) -> MenuStep {
        let page = (height as usize).saturating_sub(self.page_margin).max(1);
        match token {
            "next" | "C-v" => self.selection = (self.selection + page).min(self.last()),
            "prior" | "M-v" => self.selection = self.selection.saturating_sub(page),
            "C-c" | "C-g" => return MenuStep::Cancel,
            "UP" | "C-p" => self.selection = self.selection.saturating_sub(1),
            "DOWN" | "C-n" => self.selection = (self.selection + 1).min(self.last()),
            "LEFT" | "C-b" => self.shift = self.shift.saturating_sub(1),
            "RIGHT" | "C-f" => self.shift = self.shift.saturating_add(1),
            "C-a" | "Home" => self.shift = 0,
            "M-<" => self.selection = 0,
            "M->" => self.selection = self.last(),
            "RET" => return MenuStep::Select(self.selection),
            _ => {}
        }
        MenuStep::Continue
    }

    /// Move the window in `scroll_step` jumps until the selection is one of
    /// the `rows` visible choices.
    pub fn scroll_into_view(&mut self, rows: usize) {
        let rows = rows.max(1);
        while self.selection < self.offset {
            self.offset = self.offset.saturating_sub(self.scroll_step);
        }
        while self.selection - self.offset >= rows {
            // never past the selection, which only matters with fewer rows
            // than the step
            self.offset = (self.offset + self.scroll_step).min(self.selection);
        }
    }
}

/// Let the operator pick one of `choices`; returns its index.
///
/// `C-c`/`C-g` return `default` as given, even when it is out of range.
pub fn choose_one<S: Screen + ?Sized>(
    screen: &mut S,
    title: &str,
    choices: &[&str],
    default: usize,
) -> Result<usize> {
    choose_one_with_overlay(screen, title, choices, default, None)
}

/// As [`choose_one`], running `overlay` after each frame is drawn.
pub fn choose_one_with_overlay<S: Screen + ?Sized>(
    screen: &mut S,
    title: &str,
    choices: &[&str],
    default: usize,
    mut overlay: Option<&mut OverlayFn<'_, S>>,
) -> Result<usize> {
    if choices.is_empty() {
        debug!("menu has no choices");
        return Ok(default);
    }
    let mut state = MenuState::new(choices.len(), default);

    loop {
        let (width, height) = screen.size();
        screen.hide_cursor();
        screen.clear();
        print_str(screen, 0, 0, title);

        let rows = (height as usize).saturating_sub(1);
        state.scroll_into_view(rows);
        for (i, choice) in choices[state.offset..].iter().enumerate().take(rows.max(1)) {
            let y = (i + 1) as u16;
            print_str(screen, 3, y, trim_columns(choice, state.shift).0);
            if state.shift > 0 {
                print_str(screen, 2, y, "<");
            }
        }
        print_str(screen, 1, (state.selection - state.offset + 1) as u16, ">");

        if let Some(overlay) = overlay.as_deref_mut() {
            overlay(screen, state.selection, width, height);
        }
        screen.present()?;

        let InputEvent::Key(key) = screen.poll_event()? else {
            continue;
        };
        let token = normalize(&key);
        trace!(%token, selection = state.selection, "menu key");

        match state.apply(&token, height) {
            MenuStep::Continue => {}
            MenuStep::Select(index) => {
                debug!(index, choice = choices[index], "menu selection");
                return Ok(index);
            }
            MenuStep::Cancel => {
                debug!(default, "menu cancelled");
                return Ok(default);
            }
        }
    }
}
