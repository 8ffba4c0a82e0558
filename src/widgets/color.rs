//! 256-color palette picker.
//!
//! The palette is a 16x16 grid under the prompt. Each entry is a "pill"
//! `width / 16` cells wide: spaces on the entry's background, except the
//! selected one which is drawn as `=` in the entry's foreground.
//!
//! Movement: `LEFT`/`RIGHT` by 1, `M-LEFT`/`M-RIGHT` by 4, `UP`/`DOWN` by a
//! row (16), `M-UP`/`M-DOWN` by four rows (64), `Home`/`End` to the row ends
//! and `M-<`/`M->` to the first and last entry. Emacs chords work too.

use tracing::{debug, trace};

use crate::error::Result;
use crate::input::{normalize, InputEvent};
use crate::renderer::print_str;
use crate::terminal::Screen;
use crate::types::{Color, PaletteIndex, Style};

const TOO_SHORT: &str = "Warning: Screen too short";
const TOO_NARROW: &str = "Warning: Screen too narrow";
const GRID: u16 = 16;

/// What a token did to the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorStep {
    Continue,
    Chosen(PaletteIndex),
}

/// Picker state: the highlighted palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorPicker {
    index: PaletteIndex,
}

impl ColorPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> PaletteIndex {
        self.index
    }

    pub fn apply(&mut self, token: &str) -> ColorStep {
        let index = self.index;
        self.index = match token {
            "M-<" => PaletteIndex::FIRST,
            "M->" => PaletteIndex::LAST,
            "UP" | "C-p" => index.offset(-16),
            "DOWN" | "C-n" => index.offset(16),
            "M-UP" | "M-p" => index.offset(-64),
            "M-DOWN" | "M-n" => index.offset(64),
            "M-LEFT" | "M-b" => index.offset(-4),
            "M-RIGHT" | "M-f" => index.offset(4),
            "LEFT" | "C-b" => index.offset(-1),
            "RIGHT" | "C-f" => index.offset(1),
            "Home" | "C-a" => index.offset(-(index.column() as i32)),
            "End" | "C-e" => index.offset(15 - index.column() as i32),
            "RET" => return ColorStep::Chosen(index),
            _ => index,
        };
        ColorStep::Continue
    }
}

fn draw<S: Screen + ?Sized>(screen: &mut S, prompt: &str, picker: &ColorPicker) {
    let (width, height) = screen.size();
    let pill = width / GRID;
    screen.clear();
    print_str(screen, 0, 0, prompt);
    if height < GRID {
        print_str(screen, width.saturating_sub(TOO_SHORT.len() as u16 + 1), 0, TOO_SHORT);
    }
    if width < GRID {
        print_str(screen, width.saturating_sub(TOO_NARROW.len() as u16 + 1), 0, TOO_NARROW);
    }

    for i in 0..=u8::MAX {
        let entry = PaletteIndex::new(i);
        let color = Color::Palette(entry);
        let (ch, style) = if entry == picker.index {
            ('=', Style::DEFAULT.fg(color))
        } else {
            (' ', Style::DEFAULT.bg(color))
        };
        let y = 1 + entry.row();
        for j in 0..pill {
            screen.set_cell(entry.column() * pill + j, y, ch, style);
        }
    }

    let index = picker.index;
    screen.show_cursor(index.column() * pill, 1 + index.row());
}

/// Let the operator pick a palette entry; returns it on `RET`.
pub fn pick_color<S: Screen + ?Sized>(screen: &mut S, prompt: &str) -> Result<PaletteIndex> {
    let mut picker = ColorPicker::new();
    loop {
        draw(screen, prompt, &picker);
        screen.present()?;

        let InputEvent::Key(key) = screen.poll_event()? else {
            continue;
        };
        let token = normalize(&key);
        trace!(%token, index = %picker.index(), "color key");
        if let ColorStep::Chosen(index) = picker.apply(&token) {
            debug!(%index, "color chosen");
            return Ok(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MemoryScreen;

    fn after(tokens: &[&str]) -> u8 {
        let mut picker = ColorPicker::new();
        for token in tokens {
            picker.apply(token);
        }
        picker.index().get()
    }

    #[test]
    fn test_moves() {
        assert_eq!(after(&["RIGHT", "C-f"]), 2);
        assert_eq!(after(&["DOWN", "C-n"]), 32);
        assert_eq!(after(&["M-DOWN"]), 64);
        assert_eq!(after(&["M-n", "M-p"]), 0);
        assert_eq!(after(&["M-RIGHT", "M-f", "M-b"]), 4);
        assert_eq!(after(&["M->", "UP", "LEFT"]), 238);
        assert_eq!(after(&["M->", "M-<"]), 0);
    }

    #[test]
    fn test_clamps_at_ends() {
        assert_eq!(after(&["LEFT"]), 0);
        assert_eq!(after(&["UP", "M-UP"]), 0);
        assert_eq!(after(&["M->", "RIGHT", "DOWN", "M-DOWN"]), 255);
        assert_eq!(after(&["M-DOWN", "M-DOWN", "M-DOWN", "M-DOWN"]), 255);
    }

    #[test]
    fn test_row_ends() {
        assert_eq!(after(&["DOWN", "RIGHT", "RIGHT", "RIGHT", "End"]), 31);
        assert_eq!(after(&["DOWN", "RIGHT", "RIGHT", "C-a"]), 16);
        assert_eq!(after(&["M->", "C-e"]), 255);
        assert_eq!(after(&["Home"]), 0);
    }

    #[test]
    fn test_unknown_token_ignored() {
        assert_eq!(after(&["x", "", "TAB"]), 0);
    }

    #[test]
    fn test_ret_chooses() {
        let mut picker = ColorPicker::new();
        picker.apply("DOWN");
        assert_eq!(picker.apply("RET"), ColorStep::Chosen(PaletteIndex::new(16)));
    }

    #[test]
    fn test_pick_color_draws_grid() {
        let mut screen = MemoryScreen::new(32, 18);
        screen.push_tokens(&["RIGHT", "RET"]);
        let index = pick_color(&mut screen, "Color?").unwrap();
        assert_eq!(index, PaletteIndex::new(1));
        assert_eq!(screen.row_text(0), "Color?");

        let selected = screen.cell(2, 1).unwrap();
        assert_eq!(selected.ch, '=');
        assert_eq!(selected.style.fg, Color::RED);
        let other = screen.cell(0, 1).unwrap();
        assert_eq!(other.ch, ' ');
        assert_eq!(other.style.bg, Color::BLACK);
        assert_eq!(screen.cursor(), Some((2, 1)));
    }

    #[test]
    fn test_pick_color_warns_on_short_screen() {
        let mut screen = MemoryScreen::new(64, 10);
        screen.push_tokens(&["RET"]);
        pick_color(&mut screen, "C").unwrap();
        assert!(screen.row_text(0).ends_with(TOO_SHORT));
    }
}
