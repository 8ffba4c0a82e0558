//! Text Measurement
//!
//! Display widths of runes and strings in terminal cells, plus the small
//! rune-level helpers the editor and pager are built on.
//!
//! - Printable ASCII: 1 cell
//! - Control characters: 2 cells (drawn in caret notation, `^C`)
//! - Everything else: East Asian Width from `unicode-width`, never below 1

use unicode_width::UnicodeWidthChar;

/// True for control characters.
///
/// A Rust `char` is always a valid scalar value, so the invalid-rune case of
/// a raw code point stream cannot reach this function.
#[inline]
pub fn is_control(c: char) -> bool {
    c.is_control()
}

/// Number of cells `c` occupies when drawn.
#[inline]
pub fn rune_width(c: char) -> usize {
    if is_control(c) {
        2
    } else if (' '..='~').contains(&c) {
        1
    } else {
        match c.width() {
            Some(w) if w > 0 => w,
            _ => 1,
        }
    }
}

/// Number of cells `s` occupies when drawn. Additive over concatenation.
pub fn str_width(s: &str) -> usize {
    s.chars().map(rune_width).sum()
}

/// Word characters for word motion: ASCII alphanumerics, underscore, and
/// anything outside ASCII.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || (c as u32) > 127
}

/// Drop the first `skip` runes of `s`.
///
/// Returns the remainder and its byte offset in `s`. Skipping every rune (or
/// more) yields `("", 0)`.
pub fn trim_columns(s: &str, skip: usize) -> (&str, usize) {
    if skip == 0 {
        return (s, 0);
    }
    match s.char_indices().nth(skip) {
        Some((at, _)) => (&s[at..], at),
        None => ("", 0),
    }
}

/// Byte offset of the `n`th rune of `s`, or `s.len()` past the end.
pub fn byte_offset_of_rune(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(at, _)| at)
}

/// Expand tabs to `tab_width` spaces each.
pub fn expand_tabs(s: &str, tab_width: usize) -> String {
    if !s.contains('\t') {
        return s.to_string();
    }
    s.replace('\t', &" ".repeat(tab_width))
}
