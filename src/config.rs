//! Widget configuration.
//!
//! One [`Config`] is current per thread, the same way a theme would be. Widgets
//! read it once when they start, so changing it mid-call has no effect on a
//! running widget.
//!
//! ```rust
//! use spark_prompt::config::{config, set_config, Config};
//!
//! set_config(Config { tab_width: 4, ..Config::default() });
//! assert_eq!(config().tab_width, 4);
//! ```

use std::cell::RefCell;

/// Environment variable read by [`Config::from_env`].
pub const TAB_WIDTH_ENV: &str = "SPARK_PROMPT_TAB_WIDTH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Spaces a tab expands to in the pager.
    pub tab_width: usize,
    /// Rows the menu window jumps by when the selection leaves it.
    pub menu_scroll_step: usize,
    /// Rows subtracted from the screen height for a menu page jump.
    pub menu_page_margin: usize,
    /// Rows subtracted from the screen height for a pager page jump.
    pub pager_page_margin: usize,
    /// Text of the pager status bar.
    pub pager_status: String,
    /// Label of the pager search prompt.
    pub search_prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 8,
            menu_scroll_step: 5,
            menu_page_margin: 5,
            pager_page_margin: 2,
            pager_status: "^C, ^G, q to quit. Arrow keys/Vi keys/Emacs keys to move.".to_string(),
            search_prompt: "Search".to_string(),
        }
    }
}

impl Config {
    /// Defaults, with `tab_width` taken from `SPARK_PROMPT_TAB_WIDTH` when it
    /// holds a positive integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(width) = std::env::var(TAB_WIDTH_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|w| *w > 0)
        {
            config.tab_width = width;
        }
        config
    }
}

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::default());
}

/// Current configuration for this thread.
pub fn config() -> Config {
    CONFIG.with(|c| c.borrow().clone())
}

/// Replace the configuration for this thread.
pub fn set_config(config: Config) {
    CONFIG.with(|c| *c.borrow_mut() = config);
}

/// Restore the defaults (for testing).
pub fn reset_config() {
    set_config(Config::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.tab_width, 8);
        assert_eq!(c.menu_scroll_step, 5);
        assert_eq!(c.menu_page_margin, 5);
        assert_eq!(c.pager_page_margin, 2);
        assert_eq!(c.search_prompt, "Search");
    }

    #[test]
    fn test_set_and_reset() {
        set_config(Config {
            menu_scroll_step: 3,
            ..Config::default()
        });
        assert_eq!(config().menu_scroll_step, 3);
        reset_config();
        assert_eq!(config().menu_scroll_step, 5);
    }
}
