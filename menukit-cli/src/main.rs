use std::cell::{Cell, RefCell};
use std::io::Write;

use anyhow::Context;
use menukit::utils::{DesiredType, Sanitize, Theme};
use menukit::{Console, Menu, Prompt, SubMenu, SubQuickMenu};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const THEME_ENV: &str = "MENUKIT_THEME";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a JSON theme from `MENUKIT_THEME`, falling back to the default.
fn load_theme() -> Theme {
    let Ok(raw) = std::env::var(THEME_ENV) else {
        return Theme::default();
    };

    match serde_json::from_str(&raw) {
        Ok(theme) => {
            debug!(?theme, "loaded theme from {THEME_ENV}");
            theme
        }
        Err(e) => {
            warn!(error = %e, "ignoring malformed {THEME_ENV}");
            eprintln!("{THEME_ENV} is not a valid theme ({e}), using the default colors");
            Theme::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    println!("------------------------------------------------");
    println!("  ███╗   ███╗███████╗███╗   ██╗██╗   ██╗        ");
    println!("  ████╗ ████║██╔════╝████╗  ██║██║   ██║        ");
    println!("  ██╔████╔██║█████╗  ██╔██╗ ██║██║   ██║        ");
    println!("  ██║╚██╔╝██║██╔══╝  ██║╚██╗██║██║   ██║        ");
    println!("  ██║ ╚═╝ ██║███████╗██║ ╚████║╚██████╔╝  KIT   ");
    println!("------------------------------------------------");

    let name = RefCell::new(String::from("stranger"));
    let threads = Cell::new(4u8);
    let counter = Cell::new(0u32);

    let mut settings = SubMenu::new("Settings");
    settings
        .add_interactive_option("Change name", |console| {
            let mut prompt = Prompt::with_validation("New name:", |s| !s.is_empty());
            *name.borrow_mut() = prompt.get(console)?;
            Ok(())
        })
        .add_interactive_option("Worker threads", |console| {
            let mut prompt = Prompt::with_filters(
                "Worker threads (1-16):",
                vec![Sanitize::IsType(DesiredType::U8), Sanitize::IsBetween(1, 16)],
            );
            let answer = prompt.get(console)?;
            threads.set(answer.parse().unwrap_or(threads.get()));
            Ok(())
        });

    let mut counter_menu = SubQuickMenu::new("Counter (press a digit)");
    counter_menu
        .set_header(|out| write!(out, "Count: {}", counter.get()))
        .add_option("Increment", || counter.set(counter.get() + 1))
        .add_option("Decrement", || counter.set(counter.get().saturating_sub(1)))
        .add_option("Reset", || counter.set(0));

    let mut main = Menu::new("Main menu");
    main.set_header(|out| {
        write!(
            out,
            "Hello, {}! ({} worker threads)",
            name.borrow(),
            threads.get()
        )
    })
    .add_option("Say hello", || println!("Hello, {}!\n", name.borrow()))
    .add_submenu("Counter", &mut counter_menu)
    .add_submenu("Settings", &mut settings);

    let mut console = Console::stdio().with_theme(load_theme());
    main.run(&mut console).context("menu session failed")?;

    println!("Bye, {}. Final count: {}", name.borrow(), counter.get());
    Ok(())
}
