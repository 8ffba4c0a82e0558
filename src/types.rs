//! Core types for spark-prompt.
//!
//! These are what the widgets hand to a [`Screen`](crate::terminal::Screen):
//! colors, attributes, styles and the cells they end up in.

use std::fmt;

// =============================================================================
// Palette
// =============================================================================

/// Index into the 256-entry terminal palette.
///
/// - 0-7: Standard colors
/// - 8-15: Bright colors
/// - 16-231: 6x6x6 RGB cube
/// - 232-255: Grayscale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PaletteIndex(u8);

impl PaletteIndex {
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(255);

    /// Number of palette entries.
    pub const COUNT: usize = 256;

    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Build an index from a wider integer, clamping into 0-255.
    pub fn saturating(value: i32) -> Self {
        Self(value.clamp(0, 255) as u8)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Column of this entry in a 16x16 grid.
    #[inline]
    pub const fn column(self) -> u16 {
        (self.0 % 16) as u16
    }

    /// Row of this entry in a 16x16 grid.
    #[inline]
    pub const fn row(self) -> u16 {
        (self.0 / 16) as u16
    }

    /// Move by `delta` entries, clamping at both ends of the palette.
    pub fn offset(self, delta: i32) -> Self {
        Self::saturating(self.0 as i32 + delta)
    }
}

/// Error returned when an integer is outside the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteRangeError(pub i64);

impl fmt::Display for PaletteRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "palette index {} is outside 0-255", self.0)
    }
}

impl std::error::Error for PaletteRangeError {}

impl From<u8> for PaletteIndex {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl TryFrom<i32> for PaletteIndex {
    type Error = PaletteRangeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| PaletteRangeError(value as i64))
    }
}

impl fmt::Display for PaletteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Color
// =============================================================================

/// A cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Let the terminal pick.
    #[default]
    Default,
    /// Entry of the 256-color palette.
    Palette(PaletteIndex),
}

impl Color {
    pub const BLACK: Self = Self::Palette(PaletteIndex::new(0));
    pub const RED: Self = Self::Palette(PaletteIndex::new(1));
}

impl From<PaletteIndex> for Color {
    fn from(index: PaletteIndex) -> Self {
        Self::Palette(index)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => crossterm::style::Color::Reset,
            Color::Palette(index) => crossterm::style::Color::AnsiValue(index.get()),
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::REVERSE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
    }
}

// =============================================================================
// Style
// =============================================================================

/// Foreground, background and attributes for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl Style {
    pub const DEFAULT: Self = Self {
        fg: Color::Default,
        bg: Color::Default,
        attrs: Attr::NONE,
    };

    pub fn fg(self, fg: impl Into<Color>) -> Self {
        Self { fg: fg.into(), ..self }
    }

    pub fn bg(self, bg: impl Into<Color>) -> Self {
        Self { bg: bg.into(), ..self }
    }

    /// Toggle reverse video.
    pub fn reverse(self, on: bool) -> Self {
        let mut attrs = self.attrs;
        attrs.set(Attr::REVERSE, on);
        Self { attrs, ..self }
    }

    pub fn attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_try_from_bounds() {
        assert_eq!(PaletteIndex::try_from(0i32), Ok(PaletteIndex::FIRST));
        assert_eq!(PaletteIndex::try_from(255i32), Ok(PaletteIndex::LAST));
        assert_eq!(PaletteIndex::try_from(256i32), Err(PaletteRangeError(256)));
        assert_eq!(PaletteIndex::try_from(-1i32), Err(PaletteRangeError(-1)));
    }

    #[test]
    fn test_palette_offset_clamps() {
        assert_eq!(PaletteIndex::new(3).offset(-16), PaletteIndex::FIRST);
        assert_eq!(PaletteIndex::new(250).offset(64), PaletteIndex::LAST);
        assert_eq!(PaletteIndex::new(20).offset(4), PaletteIndex::new(24));
    }

    #[test]
    fn test_palette_grid_position() {
        let idx = PaletteIndex::new(37);
        assert_eq!(idx.row(), 2);
        assert_eq!(idx.column(), 5);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::DEFAULT.fg(Color::RED).reverse(true);
        assert_eq!(style.fg, Color::RED);
        assert!(style.attrs.contains(Attr::REVERSE));
        assert!(!style.reverse(false).attrs.contains(Attr::REVERSE));
    }

    #[test]
    fn test_color_to_crossterm() {
        let c: crossterm::style::Color = Color::Palette(PaletteIndex::new(42)).into();
        assert_eq!(c, crossterm::style::Color::AnsiValue(42));
        let d: crossterm::style::Color = Color::Default.into();
        assert_eq!(d, crossterm::style::Color::Reset);
    }
}
