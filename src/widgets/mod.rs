//! Widgets - each one owns its state for the length of a single call.
//!
//! Every widget runs the same loop on the calling thread: draw, block on
//! [`Screen::poll_event`](crate::terminal::Screen::poll_event), normalize the
//! key, apply it. Resizes and other non-key events just redraw.
//!
//! - [`editor`] - line editor and the prompt family
//! - [`menu`] - single-choice menu
//! - [`pager`] - paginated text viewer with search
//! - [`keypress`] - single-key questions (yes/no)
//! - [`color`] - 256-color palette picker

pub mod color;
pub mod editor;
pub mod keypress;
pub mod menu;
pub mod pager;

pub use color::{pick_color, ColorPicker, ColorStep};
pub use editor::{
    dynamic_prompt, edit, edit_line, prompt, prompt_with_callback, EditSession, EditStep,
    KeystrokeObserver, RefreshFn,
};
pub use keypress::{press_key, yes_no, yes_no_cancel};
pub use menu::{choose_one, choose_one_with_overlay, MenuState, MenuStep, OverlayFn};
pub use pager::{pause_for_any_key, show_paged, PagerRow, PagerState, PagerStep};
