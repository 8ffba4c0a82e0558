//! Renderer - cell grid, diff output, and drawing helpers.
//!
//! - [`FrameBuffer`] - what the screen should show
//! - [`DiffRenderer`] - writes only changed cells to the terminal
//! - [`draw`] - rune and string printing on any [`Screen`](crate::terminal::Screen)

mod buffer;
mod diff;
pub mod draw;

pub use buffer::{FrameBuffer, CONTINUATION};
pub use diff::DiffRenderer;
pub use draw::{clear_line, print_rune, print_rune_style, print_str, print_str_style};
