//! Menus driven by single keystrokes.
//!
//! Pressing a digit selects the option immediately; no Enter needed. Only
//! options `0..=9` are reachable this way.
use super::{BACK_LABEL, Menu, Selection, Submenu};
use crate::{Console, MenuError};

/// A [`Menu`] that reads one keystroke per selection.
pub struct QuickMenu<'a> {
    inner: Menu<'a>,
}

impl Default for QuickMenu<'_> {
    fn default() -> Self {
        Self::new("")
    }
}

impl QuickMenu<'_> {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            inner: Menu::with_selection(prompt, Selection::Keystroke),
        }
    }

    /// Reads one keystroke, asking again until it is a digit in
    /// `[0, option_count)`.
    pub fn read_option(&mut self, console: &mut Console) -> Result<usize, MenuError> {
        self.inner.read_option(console)
    }

    /// Renders the menu and reads one whitespace-delimited word.
    pub fn read_string(&mut self, console: &mut Console) -> Result<String, MenuError> {
        self.inner.read_string(console)
    }

    /// Runs the menu until `0` is pressed.
    pub fn run(&mut self, console: &mut Console) -> Result<(), MenuError> {
        self.inner.run(console)
    }
}

delegate_builder!(QuickMenu);

impl Submenu for QuickMenu<'_> {
    fn invoke(&mut self, console: &mut Console) -> Result<(), MenuError> {
        self.inner.run(console)
    }
}

/// A [`QuickMenu`] that is run by a parent menu; option `0` reads "Back".
pub struct SubQuickMenu<'a> {
    inner: Menu<'a>,
}

impl Default for SubQuickMenu<'_> {
    fn default() -> Self {
        Self::new("")
    }
}

impl SubQuickMenu<'_> {
    pub fn new(prompt: impl Into<String>) -> Self {
        let mut inner = Menu::with_selection(prompt, Selection::Keystroke);
        inner.relabel_exit(BACK_LABEL);
        Self { inner }
    }
}

delegate_builder!(SubQuickMenu);

impl Submenu for SubQuickMenu<'_> {
    fn invoke(&mut self, console: &mut Console) -> Result<(), MenuError> {
        self.inner.run(console)
    }
}
