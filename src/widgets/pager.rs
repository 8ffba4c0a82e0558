//! Paginated text viewer, in the spirit of `less(1)`.
//!
//! Keys:
//! - `q` `C-c` `C-g` quit
//! - `DOWN` `j` `C-n` / `UP` `k` `C-p` scroll a line
//! - `next` `C-v` / `prior` `M-v` scroll a page
//! - `g` `M-<` / `G` `M->` top / bottom
//! - `LEFT` `h` `C-b` / `RIGHT` `l` `C-f` scroll sideways, `Home` `C-a` back to column 0
//! - `/` `C-s` search forward

use tracing::{debug, trace};

use super::editor::prompt;
use crate::config::config;
use crate::error::Result;
use crate::input::{normalize, InputEvent};
use crate::renderer::{print_str, print_str_style};
use crate::terminal::Screen;
use crate::text_measure::{expand_tabs, trim_columns};
use crate::types::Style;

/// One display line: text with tabs expanded and its length in runes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerRow {
    pub text: String,
    pub len: usize,
}

impl PagerRow {
    pub fn new(line: &str, tab_width: usize) -> Self {
        let text = expand_tabs(line, tab_width);
        let len = text.chars().count();
        Self { text, len }
    }
}

/// What a token asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    Continue,
    Search,
    Quit,
}

/// Rows plus the vertical and horizontal scroll position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerState {
    rows: Vec<PagerRow>,
    top: usize,
    column: usize,
    page_margin: usize,
}

impl PagerState {
    /// Split every message on `\n` into rows.
    pub fn new<M: AsRef<str>>(messages: &[M]) -> Self {
        let config = config();
        let rows = messages
            .iter()
            .flat_map(|message| message.as_ref().split('\n'))
            .map(|line| PagerRow::new(line, config.tab_width))
            .collect();
        Self {
            rows,
            top: 0,
            column: 0,
            page_margin: config.pager_page_margin,
        }
    }

    pub fn rows(&self) -> &[PagerRow] {
        &self.rows
    }

    /// Index of the first row on screen.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Runes scrolled off the left edge.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Largest top row for a screen `height` rows tall; the last row is the
    /// status bar.
    fn max_top(&self, height: u16) -> usize {
        (self.rows.len() + 1).saturating_sub(height as usize)
    }

    fn max_column(&self) -> usize {
        self.rows.iter().map(|row| row.len).max().unwrap_or(0).saturating_sub(1)
    }

    /// Pin the view to the top when everything fits on screen.
    pub fn fit(&mut self, height: u16) {
        if height as usize > self.rows.len() {
            self.top = 0;
        }
    }

    /// Apply one canonical token for a screen `height` rows tall.
    pub fn apply(&mut self, token: &str, height: u16) -> PagerStep {
        let max_top = self.max_top(height);
        let page = (height as usize).saturating_sub(self.page_margin).max(1);
        match token {
            "q" | "C-c" | "C-g" => return PagerStep::Quit,
            "DOWN" | "j" | "C-n" => {
                if self.top < max_top {
                    self.top += 1;
                }
            }
            "UP" | "k" | "C-p" => self.top = self.top.saturating_sub(1),
            "Home" | "C-a" => self.column = 0,
            "LEFT" | "h" | "C-b" => self.column = self.column.saturating_sub(1),
            "RIGHT" | "l" | "C-f" => self.column = (self.column + 1).min(self.max_column()),
            "next" | "C-v" => self.top = (self.top + page).min(max_top),
            "prior" | "M-v" => self.top = self.top.saturating_sub(page),
            "g" | "M-<" => self.top = 0,
            "G" | "M->" => self.top = max_top,
            "/" | "C-s" => return PagerStep::Search,
            _ => {}
        }
        PagerStep::Continue
    }

    /// Jump to the first row at or after the top row containing `query`.
    /// Returns whether a row matched; an empty query never does.
    pub fn search(&mut self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }
        let found = self.rows[self.top.min(self.rows.len())..]
            .iter()
            .position(|row| row.text.contains(query));
        match found {
            Some(delta) => {
                self.top += delta;
                true
            }
            None => false,
        }
    }
}

/// Draw the visible rows and the status bar.
fn draw_rows<S: Screen + ?Sized>(screen: &mut S, width: u16, height: u16, state: &PagerState, status: &str) {
    let body = height.saturating_sub(1);
    for (y, row) in state.rows.iter().skip(state.top).take(body as usize).enumerate() {
        if state.column < row.len {
            print_str(screen, 0, y as u16, trim_columns(&row.text, state.column).0);
        }
    }

    let bar = Style::DEFAULT.reverse(true);
    let y = height.saturating_sub(1);
    for x in 0..width {
        screen.set_cell(x, y, ' ', bar);
    }
    print_str_style(screen, 0, y, status, bar);
}

/// Page through `messages` until the operator quits.
pub fn show_paged<S: Screen + ?Sized, M: AsRef<str>>(screen: &mut S, messages: &[M]) -> Result<()> {
    let config = config();
    let mut state = PagerState::new(messages);
    debug!(rows = state.rows().len(), "pager opened");
    screen.hide_cursor();

    loop {
        screen.clear();
        let (width, height) = screen.size();
        state.fit(height);
        draw_rows(screen, width, height, &state, &config.pager_status);
        screen.present()?;

        let InputEvent::Key(key) = screen.poll_event()? else {
            continue;
        };
        let token = normalize(&key);
        trace!(%token, top = state.top, "pager key");

        match state.apply(&token, height) {
            PagerStep::Continue => {}
            PagerStep::Quit => return Ok(()),
            PagerStep::Search => {
                let query = {
                    let mut backdrop = |screen: &mut S, w: u16, h: u16| {
                        draw_rows(screen, w, h, &state, &config.pager_status);
                    };
                    prompt(screen, &config.search_prompt, Some(&mut backdrop))?
                };
                screen.hide_cursor();
                let hit = state.search(&query);
                debug!(%query, hit, top = state.top, "pager search");
            }
        }
    }
}

/// Print `<More>` on `row`, wait for a key, then blank the screen.
pub fn pause_for_any_key<S: Screen + ?Sized>(screen: &mut S, row: u16) -> Result<()> {
    print_str(screen, 0, row, "<More>");
    screen.present()?;
    while !matches!(screen.poll_event()?, InputEvent::Key(_)) {}
    screen.clear();
    screen.present()
}
