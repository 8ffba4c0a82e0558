//! Widget tour.
//!
//! ```sh
//! cargo run --example widgets
//! SPARK_PROMPT_LOG=/tmp/widgets.log RUST_LOG=trace cargo run --example widgets
//! ```

use std::cell::RefCell;
use std::fs::File;
use std::sync::Mutex;

use spark_prompt::config::{set_config, Config};
use spark_prompt::widgets::prompt_with_callback;
use spark_prompt::{
    choose_one_with_overlay, pick_color, print_str_style, show_paged, str_width, yes_no, Color,
    CrosstermScreen, PaletteIndex, Screen, Style,
};
use tracing_subscriber::EnvFilter;

const TEST_PROMPT: &str = "Prompting";
const TEST_SCROLL: &str = "Scrolling through text";
const TEST_KEY: &str = "Prompting for characters";
const TEST_COLOR: &str = "Selecting colors";
const QUIT: &str = "Quit";

const LOREM: &[&str] = &[
    "Magni enim ipsa maiores.",
    " Et exercitationem quaerat iure.",
    " Asperiores consequatur laboriosam est nihil id necessitatibus ad.",
    "",
    "Sed error repudiandae magni et suscipit cupiditate enim provident.",
    " Aut in vero rerum quia voluptate.",
    " Consectetur totam omnis et aut.",
    "",
    "Est nihil quia itaque adipisci.",
    "\tDolores consequuntur minus vitae ipsum aut libero et natus.",
    "\tMagnam quo quis aperiam voluptatibus ut.",
    " Libero et atque aspernatur illum corporis sit est.",
    " Odio ipsam quisquam id autem.",
    "",
    "Sunt doloribus est tempora in eligendi corporis animi voluptatibus.",
    " Qui amet temporibus iure.",
    " Porro et enim dicta earum odio quia rem.",
    "",
];

/// Log to the file named by `SPARK_PROMPT_LOG`; the terminal belongs to the
/// widgets.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(path) = std::env::var("SPARK_PROMPT_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Cheap color cycling so redraws are visible without an RNG.
fn cycle(frame: &mut u32) -> Color {
    *frame = frame.wrapping_mul(1_103_515_245).wrapping_add(12_345);
    Color::Palette(PaletteIndex::new(((*frame >> 16) % 16) as u8))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    set_config(Config::from_env());

    let mut screen = CrosstermScreen::new()?;
    let choices = [TEST_PROMPT, TEST_SCROLL, TEST_KEY, TEST_COLOR, QUIT];
    let text: Vec<&str> = LOREM.iter().copied().cycle().take(LOREM.len() * 4).collect();
    let mut color = Color::Default;
    let mut frame = 1u32;

    loop {
        let mut overlay = |screen: &mut CrosstermScreen, selection: usize, width: u16, height: u16| {
            let wobble = (cycle(&mut frame) == Color::RED) as u16;
            print_str_style(
                screen,
                width.saturating_sub(10),
                height.saturating_sub(2 + wobble),
                &format!("Choice {selection}"),
                Style::DEFAULT.fg(color),
            );
        };
        let index = choose_one_with_overlay(&mut screen, "What do you want to test?", &choices, 0, Some(&mut overlay))?;

        match choices[index] {
            TEST_PROMPT => {
                let last = RefCell::new(("Nothing!".to_string(), String::new()));
                let mut refresh = |screen: &mut CrosstermScreen, width: u16, height: u16| {
                    let state = last.borrow();
                    let (key, buffer) = &*state;
                    screen.clear();
                    print_str_style(
                        screen,
                        width.saturating_sub(str_width(buffer) as u16),
                        height.saturating_sub(11),
                        buffer,
                        Style::DEFAULT.fg(cycle(&mut frame)),
                    );
                    print_str_style(
                        screen,
                        width.saturating_sub(10),
                        height.saturating_sub(10),
                        key,
                        Style::DEFAULT.fg(cycle(&mut frame)),
                    );
                };
                let mut record = |buffer: &str, key: &str| {
                    *last.borrow_mut() = (key.to_string(), buffer.to_string());
                };
                prompt_with_callback(&mut screen, "Type something", Some(&mut refresh), &mut record)?;
            }
            TEST_SCROLL => show_paged(&mut screen, &text)?,
            TEST_KEY => {
                let mut refresh = |screen: &mut CrosstermScreen, width: u16, height: u16| {
                    let x = (frame >> 8) as u16 % width.max(1);
                    let y = (frame >> 20) as u16 % height.max(1);
                    print_str_style(screen, x, y, "Wow!", Style::DEFAULT.fg(cycle(&mut frame)));
                };
                while yes_no(&mut screen, "Do you want to be asked y/n again?", Some(&mut refresh))? {}
            }
            TEST_COLOR => color = Color::Palette(pick_color(&mut screen, "Pick a color!")?),
            _ => break,
        }
    }

    drop(screen);
    Ok(())
}
