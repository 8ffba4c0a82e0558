//! Input Module - Event conversion
//!
//! Bridges crossterm's event system to the events widgets consume.
//!
//! - `InputEvent` - key press, resize, or anything else
//! - `convert_event` - crossterm `Event` to `InputEvent`
//! - `read_event` - blocking read from the real terminal
//! - [`keyboard::normalize`] - key event to canonical token

pub mod keyboard;

pub use keyboard::{normalize, Key, KeyEvent, Modifiers};

use crossterm::event::{read, Event as CrosstermEvent, KeyEventKind};

/// Unified event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press (or auto-repeat).
    Key(KeyEvent),
    /// Terminal resize (new width, height).
    Resize(u16, u16),
    /// Anything widgets ignore: mouse, focus, paste, key release.
    Other,
}

impl InputEvent {
    /// Canonical token if this is a key event.
    pub fn token(&self) -> Option<String> {
        match self {
            Self::Key(key) => Some(normalize(key)),
            _ => None,
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}

/// Convert a crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => InputEvent::Key(key.into()),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::Other,
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}
