//! # spark-prompt
//!
//! Line editing and small interactive widgets for character-cell terminals.
//!
//! ## Architecture
//!
//! Widgets draw through the [`Screen`] trait and read input from it, so the
//! same code runs against a real terminal ([`CrosstermScreen`]) or a scripted
//! in-memory grid ([`MemoryScreen`]). Raw key events are first normalized into
//! emacs-style tokens (`"C-a"`, `"M-f"`, `"LEFT"`, `"x"`) and every widget is
//! a small state machine over those tokens:
//!
//! ```text
//! crossterm Event → InputEvent → normalize() → token → widget state → Screen
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Colors, attributes, styles, cells
//! - [`text_measure`] - Display width of runes and strings
//! - [`input`] - Event conversion and key normalization
//! - [`renderer`] - Frame buffer, diff renderer, drawing helpers
//! - [`terminal`] - The `Screen` trait and its backends
//! - [`widgets`] - Line editor, menu, pager, key and color pickers
//! - [`config`] - Per-thread widget configuration
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```no_run
//! use spark_prompt::{choose_one, prompt, CrosstermScreen};
//!
//! fn main() -> spark_prompt::Result<()> {
//!     let mut screen = CrosstermScreen::new()?;
//!     let name = prompt(&mut screen, "Name", None)?;
//!     let pick = choose_one(&mut screen, "Pick one", &["red", "green"], 0)?;
//!     drop(screen);
//!     println!("{name} picked {pick}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod terminal;
pub mod text_measure;
pub mod types;
pub mod widgets;

// Re-export commonly used items
pub use types::*;

pub use config::{config, reset_config, set_config, Config};
pub use error::{Error, Result};

pub use input::{normalize, InputEvent, Key, KeyEvent, Modifiers};

pub use renderer::{clear_line, print_rune, print_rune_style, print_str, print_str_style};

pub use terminal::{CrosstermScreen, MemoryScreen, Screen};

pub use text_measure::{rune_width, str_width};

pub use widgets::{
    choose_one, choose_one_with_overlay, dynamic_prompt, edit, edit_line, pause_for_any_key,
    pick_color, press_key, prompt, prompt_with_callback, show_paged, yes_no, yes_no_cancel,
    KeystrokeObserver,
};
