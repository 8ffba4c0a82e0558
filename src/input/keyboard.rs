//! Keyboard events and key normalization.
//!
//! Raw key events carry a [`Key`] and [`Modifiers`]. Widgets never match on
//! those directly: [`normalize`] turns each event into an emacs-style token
//! string, and every widget switches on tokens.
//!
//! | Event                 | Token         |
//! |-----------------------|---------------|
//! | Left arrow            | `LEFT`        |
//! | Alt + Left arrow      | `M-LEFT`      |
//! | Ctrl+A (code 1)       | `C-a`         |
//! | Alt + Ctrl+A          | `C-M-a`       |
//! | Ctrl+Space (code 0)   | `C-@`         |
//! | Ctrl+_ (code 31)      | `C-_`         |
//! | `f`                   | `f`           |
//! | Alt + `f`             | `M-f`         |
//! | Space / Alt + Space   | `" "`/`M-SPC` |
//! | PageDown / PageUp     | `next`/`prior`|
//!
//! Events with no mapping normalize to the empty string, which no widget
//! binds.

use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

// =============================================================================
// TYPES
// =============================================================================

bitflags::bitflags! {
    /// Keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
    }
}

/// Control code of the null key (Ctrl+Space, Ctrl+@).
pub const CTRL_NULL: u8 = 0;
/// Control code of the unit separator (Ctrl+_).
pub const CTRL_UNIT_SEPARATOR: u8 = 31;

/// A key, as the terminal reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable rune.
    Rune(char),
    /// A control code: 0 (null), 1-26 (Ctrl+A..Ctrl+Z) or 31 (unit separator).
    Ctrl(u8),
    Enter,
    Tab,
    Backspace,
    Delete,
    Insert,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// Anything without a mapping.
    Unknown,
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A printable rune with no modifiers.
    pub fn rune(c: char) -> Self {
        Self::new(Key::Rune(c))
    }

    /// Control code for a letter: `ctrl('c')` is code 3.
    pub fn ctrl(letter: char) -> Self {
        Self::new(ctrl_key(letter))
    }

    /// Same event with Alt held.
    pub fn alt(mut self) -> Self {
        self.modifiers |= Modifiers::ALT;
        self
    }

    #[inline]
    pub fn has_alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

fn ctrl_key(letter: char) -> Key {
    match letter.to_ascii_lowercase() {
        c @ 'a'..='z' => Key::Ctrl(c as u8 - b'a' + 1),
        ' ' | '@' | '2' => Key::Ctrl(CTRL_NULL),
        '_' | '-' | '7' => Key::Ctrl(CTRL_UNIT_SEPARATOR),
        _ => Key::Unknown,
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Named tokens and the keys they come from.
const NAMED_KEYS: [(&str, Key); 14] = [
    ("DEL", Key::Backspace),
    ("TAB", Key::Tab),
    ("RET", Key::Enter),
    ("DOWN", Key::Down),
    ("UP", Key::Up),
    ("LEFT", Key::Left),
    ("RIGHT", Key::Right),
    ("next", Key::PageDown),
    ("prior", Key::PageUp),
    ("Home", Key::Home),
    ("End", Key::End),
    ("deletechar", Key::Delete),
    ("insert", Key::Insert),
    ("ESC", Key::Escape),
];

/// Canonical token for a key event.
pub fn normalize(event: &KeyEvent) -> String {
    let alt = event.has_alt();
    let meta = if alt { "M-" } else { "" };

    match event.key {
        Key::F(n) => format!("{meta}f{n}"),
        Key::Ctrl(CTRL_UNIT_SEPARATOR) => chord(alt, '_'),
        Key::Ctrl(CTRL_NULL) => chord(alt, '@'),
        Key::Ctrl(code @ 1..=26) => chord(alt, (b'a' + code - 1) as char),
        Key::Ctrl(_) | Key::Unknown => String::new(),
        Key::Rune(' ') if alt => "M-SPC".to_string(),
        Key::Rune(c) => format!("{meta}{c}"),
        key => NAMED_KEYS
            .iter()
            .find(|(_, named)| *named == key)
            .map_or_else(String::new, |(name, _)| format!("{meta}{name}")),
    }
}

fn chord(alt: bool, c: char) -> String {
    if alt {
        format!("C-M-{c}")
    } else {
        format!("C-{c}")
    }
}

impl KeyEvent {
    /// Inverse of [`normalize`]: the event a token stands for.
    ///
    /// Useful for scripting input. Returns `None` for strings `normalize`
    /// never produces.
    pub fn from_token(token: &str) -> Option<Self> {
        if let Some(rest) = token.strip_prefix("C-M-") {
            return single_char(rest).and_then(control_from_char).map(|k| Self::new(k).alt());
        }
        if let Some(rest) = token.strip_prefix("C-") {
            return single_char(rest).and_then(control_from_char).map(Self::new);
        }
        if token == "M-SPC" {
            return Some(Self::rune(' ').alt());
        }
        if let Some(rest) = token.strip_prefix("M-") {
            if let Some(c) = single_char(rest) {
                return Some(Self::rune(c).alt());
            }
            return named_key(rest).map(|k| Self::new(k).alt());
        }
        if let Some(c) = single_char(token) {
            return Some(Self::rune(c));
        }
        named_key(token).map(Self::new)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn control_from_char(c: char) -> Option<Key> {
    match c {
        'a'..='z' => Some(Key::Ctrl(c as u8 - b'a' + 1)),
        '@' => Some(Key::Ctrl(CTRL_NULL)),
        '_' => Some(Key::Ctrl(CTRL_UNIT_SEPARATOR)),
        _ => None,
    }
}

fn named_key(name: &str) -> Option<Key> {
    if let Some(n) = name.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        return Some(Key::F(n));
    }
    NAMED_KEYS.iter().find(|(token, _)| *token == name).map(|(_, key)| *key)
}

// =============================================================================
// CROSSTERM CONVERSION
// =============================================================================

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        let modifiers = convert_modifiers(event.modifiers);
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

        let key = match event.code {
            CrosstermKeyCode::Char(c) if ctrl => ctrl_key(c),
            CrosstermKeyCode::Char(c) if is_raw_control(c) => Key::Ctrl(c as u8),
            CrosstermKeyCode::Char(c) => Key::Rune(c),
            CrosstermKeyCode::Null => Key::Ctrl(CTRL_NULL),
            CrosstermKeyCode::Enter => Key::Enter,
            CrosstermKeyCode::Tab => Key::Tab,
            CrosstermKeyCode::Backspace => Key::Backspace,
            CrosstermKeyCode::Delete => Key::Delete,
            CrosstermKeyCode::Insert => Key::Insert,
            CrosstermKeyCode::Esc => Key::Escape,
            CrosstermKeyCode::Up => Key::Up,
            CrosstermKeyCode::Down => Key::Down,
            CrosstermKeyCode::Left => Key::Left,
            CrosstermKeyCode::Right => Key::Right,
            CrosstermKeyCode::Home => Key::Home,
            CrosstermKeyCode::End => Key::End,
            CrosstermKeyCode::PageUp => Key::PageUp,
            CrosstermKeyCode::PageDown => Key::PageDown,
            CrosstermKeyCode::F(n) => Key::F(n),
            _ => Key::Unknown,
        };

        // Ctrl is folded into the key itself; only Alt and Shift survive.
        Self {
            key,
            modifiers: modifiers - Modifiers::CTRL,
        }
    }
}

fn is_raw_control(c: char) -> bool {
    matches!(c as u32, 0 | 1..=26 | 31)
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
