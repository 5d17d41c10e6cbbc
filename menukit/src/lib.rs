//! # menukit
//!
//! Build numbered console menus, validated prompts and single-keystroke
//! menus for interactive CLI applications.
//!
//! ## Features
//!
//! - **Menus** - numbered options, each bound to an action, with a reserved
//!   `0. Exit` option that ends the loop
//! - **Submenus** - menus that only run from a parent option (`0. Back`)
//! - **Prompts** - ask for one string, re-asking until a predicate or a set of
//!   [`utils::Sanitize`] filters accept it
//! - **Quick menus** - select with a single keystroke, no Enter needed
//! - **Headers** - dynamic content rendered above the options on every pass
//! - **Themes** - colors for headers, options, the exit option and errors
//!   (serializable with the `serde` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use menukit::{Console, Menu, Prompt, SubMenu};
//! use std::cell::RefCell;
//! use std::io::Write;
//!
//! let name = RefCell::new(String::from("stranger"));
//!
//! let mut settings = SubMenu::new("Settings");
//! settings.add_interactive_option("Change name", |console| {
//!     let mut prompt = Prompt::with_validation("New name:", |s| !s.is_empty());
//!     *name.borrow_mut() = prompt.get(console)?;
//!     Ok(())
//! });
//!
//! let mut main = Menu::new("Main menu");
//! main.set_header(|out| write!(out, "Hello, {}", name.borrow()))
//!     .add_option("Ping", || println!("pong"))
//!     .add_submenu("Settings", &mut settings);
//!
//! main.run(&mut Console::stdio()).unwrap();
//! ```
//!
//! ## Architecture
//!
//! - **`menu`** - [`Menu`] and its variants, the [`Submenu`] capability
//! - **`utils`** - [`Console`] I/O context, raw keystroke input, styles and
//!   input filters
//! - **`error`** - [`MenuError`]
//!
//! ## Error Handling
//!
//! Invalid selections and rejected input are handled by asking again. Only
//! I/O failures and closed input reach the caller:
//!
//! ```rust,no_run
//! use menukit::{Console, Menu, MenuError};
//!
//! let mut menu = Menu::new("Main");
//! match menu.run(&mut Console::stdio()) {
//!     Ok(()) => {}
//!     Err(MenuError::InputClosed) => eprintln!("stdin closed"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod error;
pub use error::MenuError;

pub mod menu;
pub use menu::{Menu, Prompt, QuickMenu, SubMenu, SubQuickMenu, Submenu};

pub mod utils;
pub use utils::Console;
