//! # Menus
//!
//! Numbered console menus and their variants.
//!
//! A [`Menu`] holds a title, an ordered list of options and one action per
//! option. Option `0` always exists: it is labeled "Exit" and its action
//! clears the display and ends [`Menu::run`]. Every other option runs the
//! action registered at the same index.
//!
//! ```text
//! Main menu            <- title
//! <header output>      <- optional header renderer
//! 1. Start             <- options 1..n
//! 2. Settings
//! 0. Exit              <- reserved option, always last
//! >
//! ```
//!
//! ## Variants
//!
//! - [`SubMenu`]: option `0` reads "Back"; can only be run by a parent menu.
//! - [`Prompt`]: asks for one validated string instead of dispatching options.
//! - [`QuickMenu`]: selects with a single keystroke instead of a typed line.
//! - [`SubQuickMenu`]: a [`QuickMenu`] that can only be run by a parent menu.
//!
//! ## Run loop
//!
//! ```text
//! clear, render
//!   └─> read option ──> clear ──> run action ──> option 0? ──yes──> done
//!            ^                                      │ no
//!            └──────────────── render <─────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use menukit::{Console, Menu, SubMenu};
//! use std::io::Write;
//!
//! let mut settings = SubMenu::new("Settings");
//! settings.add_option("Toggle sound", || println!("sound toggled"));
//!
//! let mut main = Menu::new("Main menu");
//! main.add_option("Start", || println!("starting"))
//!     .add_submenu("Settings", &mut settings)
//!     .set_header(|out| write!(out, "Welcome back"));
//!
//! main.run(&mut Console::stdio()).unwrap();
//! ```
use std::io::{self, Write};

use tracing::{debug, trace};

use crate::error::MenuError;
use crate::utils::{Console, Style};

/// Generates the builder and recall surface of a type wrapping a [`Menu`]
/// in its `inner` field.
macro_rules! delegate_builder {
    ($ty:ident) => {
        impl<'a> $ty<'a> {
            /// Appends an option; see [`Menu::add_option`].
            pub fn add_option(
                &mut self,
                label: impl Into<String>,
                action: impl FnMut() + 'a,
            ) -> &mut Self {
                self.inner.add_option(label, action);
                self
            }

            /// Appends an option whose action can use the console; see
            /// [`Menu::add_interactive_option`].
            pub fn add_interactive_option(
                &mut self,
                label: impl Into<String>,
                action: impl FnMut(&mut $crate::Console) -> Result<(), $crate::MenuError> + 'a,
            ) -> &mut Self {
                self.inner.add_interactive_option(label, action);
                self
            }

            /// Appends an option that runs `submenu`; see [`Menu::add_submenu`].
            pub fn add_submenu<S: $crate::Submenu + 'a>(
                &mut self,
                label: impl Into<String>,
                submenu: &'a mut S,
            ) -> &mut Self {
                self.inner.add_submenu(label, submenu);
                self
            }

            /// Appends an option that runs an owned `submenu`.
            pub fn add_owned_submenu<S: $crate::Submenu + 'a>(
                &mut self,
                label: impl Into<String>,
                submenu: S,
            ) -> &mut Self {
                self.inner.add_owned_submenu(label, submenu);
                self
            }

            pub fn set_header(
                &mut self,
                header: impl Fn(&mut dyn std::io::Write) -> std::io::Result<()> + 'a,
            ) -> &mut Self {
                self.inner.set_header(header);
                self
            }

            pub fn set_title(&mut self, prompt: impl Into<String>) -> &mut Self {
                self.inner.set_title(prompt);
                self
            }

            pub fn title(&self) -> &str {
                self.inner.title()
            }

            pub fn label(&self, index: usize) -> Option<&str> {
                self.inner.label(index)
            }

            pub fn labels(&self) -> Vec<&str> {
                self.inner.labels()
            }

            pub fn option_count(&self) -> usize {
                self.inner.option_count()
            }

            pub fn recall_option(&self) -> Option<usize> {
                self.inner.recall_option()
            }

            pub fn recall_string(&self) -> &str {
                self.inner.recall_string()
            }
        }
    };
}

mod prompt;
mod quick;
mod submenu;

pub use prompt::Prompt;
pub use quick::{QuickMenu, SubQuickMenu};
pub use submenu::SubMenu;

pub(crate) const EXIT_LABEL: &str = "Exit";
pub(crate) const BACK_LABEL: &str = "Back";
const INVALID_OPTION: &str = "Invalid option.";

/// A menu that can be attached to another menu and run as one of its
/// options.
///
/// This is the only capability [`SubMenu`] and [`SubQuickMenu`] expose:
/// they cannot be run directly.
pub trait Submenu {
    /// Runs the menu until its option `0` is chosen.
    fn invoke(&mut self, console: &mut Console) -> Result<(), MenuError>;
}

type Header<'a> = Box<dyn Fn(&mut dyn Write) -> io::Result<()> + 'a>;

/// The menu run by a submenu option.
enum Target<'a> {
    Borrowed(&'a mut (dyn Submenu + 'a)),
    Owned(Box<dyn Submenu + 'a>),
}

enum Action<'a> {
    Clear,
    Call(Box<dyn FnMut() + 'a>),
    Interactive(Box<dyn FnMut(&mut Console) -> Result<(), MenuError> + 'a>),
    Submenu(Target<'a>),
}

struct Entry<'a> {
    label: String,
    action: Action<'a>,
}

/// How a selection is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Selection {
    /// A typed line holding the option number.
    Line,
    /// One keystroke, the option digit.
    Keystroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    Numbered,
    InputOnly,
}

/// A numbered console menu.
///
/// Options are dispatched by index; `0` is reserved for "Exit". Actions may
/// borrow state for `'a`, which is how a parent menu refers to its
/// submenus.
pub struct Menu<'a> {
    prompt: String,
    entries: Vec<Entry<'a>>,
    header: Option<Header<'a>>,
    selection: Selection,
    last_option: Option<usize>,
    last_string: String,
}

impl Default for Menu<'_> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<'a> Menu<'a> {
    /// Creates a menu with the given title (may be empty) and the "Exit"
    /// option.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::with_selection(prompt, Selection::Line)
    }

    pub(crate) fn with_selection(prompt: impl Into<String>, selection: Selection) -> Self {
        Self {
            prompt: prompt.into(),
            entries: vec![Entry {
                label: EXIT_LABEL.to_string(),
                action: Action::Clear,
            }],
            header: None,
            selection,
            last_option: None,
            last_string: String::new(),
        }
    }

    pub(crate) fn relabel_exit(&mut self, label: &str) {
        self.entries[0].label = label.to_string();
    }

    fn push(&mut self, label: impl Into<String>, action: Action<'a>) -> &mut Self {
        self.entries.push(Entry {
            label: label.into(),
            action,
        });
        self
    }

    /// Appends an option. Labels are not checked for uniqueness.
    pub fn add_option(&mut self, label: impl Into<String>, action: impl FnMut() + 'a) -> &mut Self {
        self.push(label, Action::Call(Box::new(action)))
    }

    /// Appends an option whose action gets the running console, e.g. to ask
    /// a [`Prompt`] on the same input.
    pub fn add_interactive_option(
        &mut self,
        label: impl Into<String>,
        action: impl FnMut(&mut Console) -> Result<(), MenuError> + 'a,
    ) -> &mut Self {
        self.push(label, Action::Interactive(Box::new(action)))
    }

    /// Appends an option that runs `submenu`.
    ///
    /// The submenu stays borrowed for as long as this menu lives.
    pub fn add_submenu<S: Submenu + 'a>(
        &mut self,
        label: impl Into<String>,
        submenu: &'a mut S,
    ) -> &mut Self {
        self.push(label, Action::Submenu(Target::Borrowed(submenu)))
    }

    /// Appends an option that runs `submenu`, which this menu takes over.
    pub fn add_owned_submenu<S: Submenu + 'a>(
        &mut self,
        label: impl Into<String>,
        submenu: S,
    ) -> &mut Self {
        self.push(label, Action::Submenu(Target::Owned(Box::new(submenu))))
    }

    /// Sets the renderer called on every render, between the title and the
    /// options. Replaces any previous header.
    pub fn set_header(
        &mut self,
        header: impl Fn(&mut dyn Write) -> io::Result<()> + 'a,
    ) -> &mut Self {
        self.header = Some(Box::new(header));
        self
    }

    pub fn set_title(&mut self, prompt: impl Into<String>) -> &mut Self {
        self.prompt = prompt.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.prompt
    }

    /// The label of option `index`, if it exists.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.label.as_str())
    }

    /// All labels, option `0` first.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Number of options, including option `0`.
    pub fn option_count(&self) -> usize {
        self.entries.len()
    }

    /// The last option read, or `None` before the first read.
    pub fn recall_option(&self) -> Option<usize> {
        self.last_option
    }

    /// The last string read with [`Menu::read_string`].
    pub fn recall_string(&self) -> &str {
        &self.last_string
    }

    pub(crate) fn render(&self, console: &mut Console, layout: Layout) -> Result<(), MenuError> {
        let theme = *console.theme();
        let out = console.output();

        if !self.prompt.is_empty() {
            writeln!(out, "{}", self.prompt)?;
        }

        if let Some(header) = &self.header {
            if !self.prompt.is_empty() {
                write!(out, "{}", theme.header)?;
            }
            header(&mut *out)?;
            writeln!(out, "{}", Style::Reset)?;
        }

        match layout {
            Layout::Numbered => {
                write!(out, "{}", theme.option)?;
                for (index, entry) in self.entries.iter().enumerate().skip(1) {
                    writeln!(out, "{}. {}", index, entry.label)?;
                }
                // Option 0 goes last.
                write!(
                    out,
                    "{}0. {}{}\n> ",
                    theme.exit,
                    self.entries[0].label,
                    Style::Reset
                )?;
            }
            Layout::InputOnly => write!(out, "{}> ", Style::Reset)?,
        }

        out.flush()?;
        Ok(())
    }

    /// Renders the menu and reads one whitespace-delimited word.
    pub fn read_string(&mut self, console: &mut Console) -> Result<String, MenuError> {
        self.read_string_with(console, Layout::Numbered)
    }

    pub(crate) fn read_string_with(
        &mut self,
        console: &mut Console,
        layout: Layout,
    ) -> Result<String, MenuError> {
        self.render(console, layout)?;
        let input = console.read_token()?;
        writeln!(console.output())?;
        self.last_string = input.clone();
        Ok(input)
    }

    /// Reads a selection, asking again until it is in `[0, option_count)`.
    ///
    /// The menu is not rendered again between attempts.
    pub fn read_option(&mut self, console: &mut Console) -> Result<usize, MenuError> {
        let option = match self.selection {
            Selection::Line => self.read_line_option(console)?,
            Selection::Keystroke => self.read_key_option(console)?,
        };

        writeln!(console.output())?;
        self.last_option = Some(option);
        Ok(option)
    }

    fn read_line_option(&self, console: &mut Console) -> Result<usize, MenuError> {
        loop {
            let token = console.read_token()?;
            match token.parse::<usize>() {
                Ok(option) if option < self.entries.len() => return Ok(option),
                _ => {
                    trace!(%token, "rejected menu selection");
                    let error = console.theme().error;
                    write!(
                        console.output(),
                        "{}{}\n{}> ",
                        error,
                        INVALID_OPTION,
                        Style::Reset
                    )?;
                }
            }
        }
    }

    fn read_key_option(&self, console: &mut Console) -> Result<usize, MenuError> {
        loop {
            let key = console.read_key()?;
            match key.to_digit(10).map(|d| d as usize) {
                Some(option) if option < self.entries.len() => return Ok(option),
                _ => {
                    trace!(%key, "rejected menu keystroke");
                    let error = console.theme().error;
                    write!(
                        console.output(),
                        "{}{}\n{}",
                        error,
                        INVALID_OPTION,
                        Style::Reset
                    )?;
                }
            }
        }
    }

    /// Runs the menu until option `0` is chosen.
    pub fn run(&mut self, console: &mut Console) -> Result<(), MenuError> {
        console.clear()?;
        self.render(console, Layout::Numbered)?;
        loop {
            let option = self.read_option(console)?;
            console.clear()?;
            self.dispatch(option, console)?;
            if option == 0 {
                return Ok(());
            }
            self.render(console, Layout::Numbered)?;
        }
    }

    fn dispatch(&mut self, index: usize, console: &mut Console) -> Result<(), MenuError> {
        let Some(entry) = self.entries.get_mut(index) else {
            return Ok(());
        };
        debug!(index, label = %entry.label, "running menu option");

        match &mut entry.action {
            Action::Clear => console.clear(),
            Action::Call(action) => {
                action();
                Ok(())
            }
            Action::Interactive(action) => action(console),
            Action::Submenu(Target::Borrowed(submenu)) => submenu.invoke(console),
            Action::Submenu(Target::Owned(submenu)) => submenu.invoke(console),
        }
    }
}

impl Submenu for Menu<'_> {
    fn invoke(&mut self, console: &mut Console) -> Result<(), MenuError> {
        self.run(console)
    }
}
