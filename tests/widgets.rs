//! End-to-end widget runs against a scripted `MemoryScreen`.

use spark_prompt::input::KeyEvent;
use spark_prompt::terminal::MemoryScreen;
use spark_prompt::widgets::{show_paged, KeystrokeObserver};
use spark_prompt::{
    choose_one, choose_one_with_overlay, edit, edit_line, normalize, pick_color, press_key,
    prompt, yes_no, yes_no_cancel, Error, PaletteIndex, Screen,
};

// =============================================================================
// Key normalization
// =============================================================================

#[test]
fn test_ctrl_c_tokens() {
    assert_eq!(normalize(&KeyEvent::ctrl('c')), "C-c");
    assert_eq!(normalize(&KeyEvent::ctrl('c').alt()), "C-M-c");
}

#[test]
fn test_crossterm_ctrl_c_is_c_c() {
    use crossterm::event::{KeyCode, KeyEvent as CtKeyEvent, KeyModifiers};
    let raw = CtKeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(normalize(&KeyEvent::from(raw)), "C-c");
    let raw = CtKeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL | KeyModifiers::ALT);
    assert_eq!(normalize(&KeyEvent::from(raw)), "C-M-c");
}

// =============================================================================
// Line editor
// =============================================================================

#[test]
fn test_edit_left_left_backspace() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.push_tokens(&["LEFT", "LEFT", "C-h", "RET"]);
    let result = edit(&mut screen, "hello", "Word", None).unwrap();
    assert_eq!(result, "helo");
    // "Word: " is 6 wide, cursor sits before "lo"
    assert_eq!(screen.cursor(), Some((8, 3)));
}

#[test]
fn test_emacs_editing_session() {
    let mut screen = MemoryScreen::new(60, 4);
    screen
        .type_text("the quick fox")
        .push_tokens(&["M-b", "M-b", "M-d", "C-e", "M-DEL"])
        .type_text("dog")
        .push_tokens(&["C-a", "C-d", "RET"]);
    let result = prompt(&mut screen, "Edit", None).unwrap();
    assert_eq!(result, "he  dog");
}

#[test]
fn test_cancel_keeps_seed_after_edits() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.push_tokens(&["C-u"]).type_text("new").push_tokens(&["C-c"]);
    assert_eq!(edit(&mut screen, "old", "Value", None).unwrap(), "old");
}

#[test]
fn test_observer_struct() {
    struct Counter {
        keys: usize,
    }

    impl KeystrokeObserver for Counter {
        fn on_keystroke(&mut self, buffer: &str, _token: &str) -> Option<String> {
            self.keys += 1;
            (buffer == "ab").then(|| "abc".to_string())
        }
    }

    let mut screen = MemoryScreen::new(40, 4);
    screen.type_text("ab").push_tokens(&["RET"]);
    let mut counter = Counter { keys: 0 };
    let result = edit_line(&mut screen, "", "P", None, Some(&mut counter)).unwrap();
    assert_eq!(result, "abc");
    assert_eq!(counter.keys, 3);
}

#[test]
fn test_observer_runs_on_delete_at_end_once() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.push_tokens(&["C-d", "RET"]);
    let mut seen = Vec::new();
    let mut observer = |buffer: &str, token: &str| -> Option<String> {
        seen.push(format!("{buffer}|{token}"));
        None
    };
    let result = edit_line(&mut screen, "end", "P", None, Some(&mut observer)).unwrap();
    assert_eq!(result, "end");
    assert_eq!(seen, vec!["end|C-d", "end|RET"]);
}

#[test]
fn test_cancel_notifies_observer_and_returns_seed() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.type_text("zz").push_tokens(&["C-g"]);
    let mut seen = Vec::new();
    let mut observer = |buffer: &str, token: &str| -> Option<String> {
        seen.push(format!("{buffer}|{token}"));
        Some("REPLACED".to_string())
    };
    let result = edit_line(&mut screen, "seed", "P", None, Some(&mut observer)).unwrap();
    assert_eq!(result, "seed");
    assert_eq!(seen, vec!["seedz|z", "REPLACEDz|z", "REPLACED|C-g"]);
    assert_eq!(seen.last().map(String::as_str), Some("REPLACED|C-g"));
}

#[test]
fn test_exhausted_script_surfaces_terminal_error() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.type_text("abc");
    match prompt(&mut screen, "P", None) {
        Err(Error::Terminal { .. }) => {}
        other => panic!("expected terminal error, got {other:?}"),
    }
}

// =============================================================================
// Menu
// =============================================================================

#[test]
fn test_menu_down_down_ret() {
    let mut screen = MemoryScreen::new(20, 8);
    screen.push_tokens(&["DOWN", "DOWN", "RET"]);
    assert_eq!(choose_one(&mut screen, "Pick", &["A", "B", "C"], 0).unwrap(), 2);
}

#[test]
fn test_menu_scrolls_long_list() {
    let labels: Vec<String> = (0..30).map(|i| format!("item {i}")).collect();
    let choices: Vec<&str> = labels.iter().map(String::as_str).collect();
    let mut screen = MemoryScreen::new(20, 6);
    screen.push_tokens(&["M->", "RET"]);
    assert_eq!(choose_one(&mut screen, "Pick", &choices, 0).unwrap(), 29);
    // window jumped to 25 in steps of 5
    assert_eq!(screen.row_text(1), "   item 25");
    assert_eq!(screen.row_text(5), " > item 29");
}

#[test]
fn test_menu_overlay_draws_on_top() {
    let mut screen = MemoryScreen::new(20, 6);
    screen.push_tokens(&["RET"]);
    let mut overlay = |screen: &mut MemoryScreen, selection: usize, width: u16, _: u16| {
        spark_prompt::print_str(screen, width - 2, 0, &selection.to_string());
    };
    choose_one_with_overlay(&mut screen, "T", &["x"], 0, Some(&mut overlay)).unwrap();
    assert!(screen.row_text(0).ends_with('0'));
}

// =============================================================================
// Pager
// =============================================================================

#[test]
fn test_pager_search_moves_to_match() {
    let mut screen = MemoryScreen::new(40, 3);
    screen
        .push_tokens(&["/"])
        .type_text("cher")
        .push_tokens(&["RET", "q"]);
    show_paged(&mut screen, &["apple", "banana", "cherry"]).unwrap();
    assert_eq!(screen.row_text(0), "cherry");
}

#[test]
fn test_pager_search_miss_stays() {
    let mut screen = MemoryScreen::new(40, 3);
    screen
        .push_tokens(&["C-s"])
        .type_text("xyz")
        .push_tokens(&["RET", "q"]);
    show_paged(&mut screen, &["apple", "banana", "cherry"]).unwrap();
    assert_eq!(screen.row_text(0), "apple");
    assert_eq!(screen.row_text(1), "banana");
}

#[test]
fn test_pager_search_prompt_over_rows() {
    let mut screen = MemoryScreen::new(40, 3);
    screen.push_tokens(&["/"]).type_text("ban").push_tokens(&["C-g", "q"]);
    show_paged(&mut screen, &["apple\nbanana\ncherry"]).unwrap();
    assert_eq!(screen.row_text(0), "apple");
    assert_eq!(screen.cursor(), None);
}

// =============================================================================
// Key and color pickers
// =============================================================================

#[test]
fn test_yes_no_flow() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.push_tokens(&["x", "y", "n"]);
    assert!(yes_no(&mut screen, "Again?", None).unwrap());
    assert!(!yes_no(&mut screen, "Again?", None).unwrap());
}

#[test]
fn test_yes_no_cancel_flow() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.push_tokens(&["C-c", "C-g"]);
    let err = yes_no_cancel(&mut screen, "Sure?", None).unwrap_err();
    assert!(matches!(err, Error::UserCancelled));
    assert_eq!(err.to_string(), "User cancelled");
}

#[test]
fn test_press_key_named_tokens() {
    let mut screen = MemoryScreen::new(40, 4);
    screen.push_tokens(&["a", "M-x", "RET"]);
    let key = press_key(&mut screen, "Key", None, &["RET", "M-x"]).unwrap();
    assert_eq!(key, "M-x");
}

#[test]
fn test_pick_color_flow() {
    let mut screen = MemoryScreen::new(64, 20);
    screen.push_tokens(&["DOWN", "M-RIGHT", "C-e", "LEFT", "RET"]);
    let index = pick_color(&mut screen, "Color").unwrap();
    assert_eq!(index, PaletteIndex::new(30));
    let (w, h) = screen.size();
    assert_eq!((w, h), (64, 20));
}
