//! Drawing helpers.
//!
//! Control runes are made visible: codes up to 26 as reverse-video caret
//! notation (`^A`..`^Z`, `^@` for null), anything else as U+FFFD. Strings
//! advance by [`rune_width`] so wide runes and carets line up with what the
//! editor computes.

use crate::terminal::Screen;
use crate::text_measure::{is_control, rune_width};
use crate::types::Style;

/// Print a rune in the default style.
pub fn print_rune<S: Screen + ?Sized>(screen: &mut S, x: u16, y: u16, ch: char) {
    print_rune_style(screen, x, y, ch, Style::DEFAULT);
}

/// Print a rune, drawing control runes in caret notation.
pub fn print_rune_style<S: Screen + ?Sized>(screen: &mut S, x: u16, y: u16, ch: char, style: Style) {
    if !is_control(ch) {
        screen.set_cell(x, y, ch, style);
        return;
    }
    let code = ch as u32;
    if code <= 26 {
        let caret = style.reverse(true);
        screen.set_cell(x, y, '^', caret);
        // '@' + code stays inside '@'..='Z'
        let letter = char::from_u32('@' as u32 + code).unwrap_or('?');
        screen.set_cell(x.saturating_add(1), y, letter, caret);
    } else {
        screen.set_cell(x, y, '\u{fffd}', style);
    }
}

/// Print a string in the default style.
pub fn print_str<S: Screen + ?Sized>(screen: &mut S, x: u16, y: u16, s: &str) {
    print_str_style(screen, x, y, s, Style::DEFAULT);
}

/// Print a string; returns the column after the last rune.
pub fn print_str_style<S: Screen + ?Sized>(screen: &mut S, x: u16, y: u16, s: &str, style: Style) -> u16 {
    let mut col = x;
    for ch in s.chars() {
        print_rune_style(screen, col, y, ch, style);
        col = col.saturating_add(rune_width(ch) as u16);
    }
    col
}

/// Blank row `y` across `width` columns.
pub fn clear_line<S: Screen + ?Sized>(screen: &mut S, width: u16, y: u16) {
    for x in 0..width {
        screen.set_cell(x, y, ' ', Style::DEFAULT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MemoryScreen;
    use crate::types::{Attr, Color};

    #[test]
    fn test_print_str() {
        let mut screen = MemoryScreen::new(20, 2);
        print_str(&mut screen, 2, 0, "hello");
        assert_eq!(screen.row_text(0), "  hello");
    }

    #[test]
    fn test_control_rune_caret() {
        let mut screen = MemoryScreen::new(10, 1);
        let end = print_str_style(&mut screen, 0, 0, "a\u{3}b", Style::DEFAULT);
        assert_eq!(screen.row_text(0), "a^Cb");
        assert_eq!(end, 4);
        let caret = screen.cell(1, 0).unwrap();
        assert!(caret.style.attrs.contains(Attr::REVERSE));
        assert!(!screen.cell(0, 0).unwrap().style.attrs.contains(Attr::REVERSE));
    }

    #[test]
    fn test_other_control_rune_replacement() {
        let mut screen = MemoryScreen::new(10, 1);
        print_rune(&mut screen, 0, 0, '\u{1b}');
        assert_eq!(screen.cell(0, 0).unwrap().ch, '\u{fffd}');
    }

    #[test]
    fn test_wide_runes_advance_two() {
        let mut screen = MemoryScreen::new(10, 1);
        let end = print_str_style(&mut screen, 0, 0, "日x", Style::DEFAULT);
        assert_eq!(screen.cell(2, 0).unwrap().ch, 'x');
        assert_eq!(end, 3);
    }

    #[test]
    fn test_clear_line() {
        let mut screen = MemoryScreen::new(5, 2);
        print_str_style(&mut screen, 0, 1, "abcde", Style::DEFAULT.fg(Color::RED));
        clear_line(&mut screen, 5, 1);
        assert_eq!(screen.row_text(1), "");
        assert_eq!(screen.cell(0, 1).unwrap().style, Style::DEFAULT);
    }
}
