//! Single-keypress questions.

use tracing::{debug, trace};

use super::editor::RefreshFn;
use crate::error::{Error, Result};
use crate::input::{normalize, InputEvent};
use crate::renderer::{clear_line, print_str};
use crate::terminal::Screen;

/// Show `"<prompt> (k1/k2/...)"` on the last row and wait for one of `keys`.
///
/// Returns the token that matched. Other keys are ignored; a resize redraws.
pub fn press_key<S: Screen + ?Sized>(
    screen: &mut S,
    prompt: &str,
    mut refresh: Option<&mut RefreshFn<'_, S>>,
    keys: &[&str],
) -> Result<String> {
    let label = format!("{prompt} ({})", keys.join("/"));
    let cursor_x = (label.chars().count() + 1).min(u16::MAX as usize) as u16;

    let mut draw = |screen: &mut S| -> Result<()> {
        let (width, height) = screen.size();
        if let Some(refresh) = refresh.as_deref_mut() {
            refresh(screen, width, height);
        }
        let y = height.saturating_sub(1);
        clear_line(screen, width, y);
        print_str(screen, 0, y, &label);
        screen.show_cursor(cursor_x, y);
        screen.present()
    };

    draw(screen)?;
    loop {
        match screen.poll_event()? {
            InputEvent::Resize(..) => draw(screen)?,
            InputEvent::Key(key) => {
                let token = normalize(&key);
                trace!(%token, "press_key");
                if let Some(hit) = keys.iter().find(|k| **k == token) {
                    debug!(key = %hit, "key pressed");
                    return Ok(hit.to_string());
                }
            }
            InputEvent::Other => {}
        }
    }
}

/// Ask a yes/no question; `true` on `y`.
pub fn yes_no<S: Screen + ?Sized>(
    screen: &mut S,
    prompt: &str,
    refresh: Option<&mut RefreshFn<'_, S>>,
) -> Result<bool> {
    Ok(press_key(screen, prompt, refresh, &["y", "n"])? == "y")
}

/// As [`yes_no`], with `C-g` failing with [`Error::UserCancelled`].
pub fn yes_no_cancel<S: Screen + ?Sized>(
    screen: &mut S,
    prompt: &str,
    refresh: Option<&mut RefreshFn<'_, S>>,
) -> Result<bool> {
    match press_key(screen, prompt, refresh, &["y", "n", "C-g"])?.as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(Error::UserCancelled),
    }
}
