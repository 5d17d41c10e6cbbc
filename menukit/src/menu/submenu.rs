use super::{BACK_LABEL, Menu, Submenu};
use crate::{Console, MenuError};

/// A [`Menu`] that is run by a parent menu.
///
/// Option `0` reads "Back". There is no public `run`: attach it with
/// [`Menu::add_submenu`] and the parent runs it when the option is chosen.
pub struct SubMenu<'a> {
    inner: Menu<'a>,
}

impl Default for SubMenu<'_> {
    fn default() -> Self {
        Self::new("")
    }
}

impl SubMenu<'_> {
    pub fn new(prompt: impl Into<String>) -> Self {
        let mut inner = Menu::new(prompt);
        inner.relabel_exit(BACK_LABEL);
        Self { inner }
    }
}

delegate_builder!(SubMenu);

impl Submenu for SubMenu<'_> {
    fn invoke(&mut self, console: &mut Console) -> Result<(), MenuError> {
        self.inner.run(console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::terminal::testing::scripted;
    use std::cell::Cell;

    #[test]
    fn test_submenu_is_labeled_back() {
        let mut sub = SubMenu::new("Settings");
        sub.add_option("Sound", || {});
        assert_eq!(sub.labels(), vec!["Back", "Sound"]);
        assert_eq!(SubMenu::default().label(0), Some("Back"));
    }

    #[test]
    fn test_submenu_runs_from_parent() {
        let sound = Cell::new(false);
        let mut sub = SubMenu::new("Settings");
        sub.add_option("Toggle sound", || sound.set(!sound.get()));

        let mut main = Menu::new("Main");
        main.add_submenu("Settings", &mut sub);

        let (mut console, out) = scripted("1\n1\n0\n0\n");
        main.run(&mut console).unwrap();

        assert!(sound.get());
        assert!(out.contents().contains("0. Back"));
        assert!(out.contents().contains("1. Toggle sound"));
    }

    #[test]
    fn test_nested_submenus() {
        let depth = Cell::new(0);
        let mut inner = SubMenu::new("Inner");
        inner.add_option("Mark", || depth.set(2));

        let mut middle = SubMenu::new("Middle");
        middle.add_submenu("Inner", &mut inner);

        let mut main = Menu::new("Main");
        main.add_submenu("Middle", &mut middle);

        let (mut console, _) = scripted("1\n1\n1\n0\n0\n0\n");
        main.run(&mut console).unwrap();
        assert_eq!(depth.get(), 2);
        assert_eq!(main.recall_option(), Some(0));
    }
}
