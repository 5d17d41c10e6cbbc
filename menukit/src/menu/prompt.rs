use std::io::{self, Write};

use tracing::trace;

use super::{Layout, Menu};
use crate::utils::{Sanitize, Style};
use crate::{Console, MenuError};

const INVALID_INPUT: &str = "Invalid input.";

enum Validation<'a> {
    Predicate(Box<dyn Fn(&str) -> bool + 'a>),
    Filters(Vec<Sanitize>),
}

impl Validation<'_> {
    /// `Err` carries the message shown before asking again.
    fn check(&self, input: &str) -> Result<(), String> {
        match self {
            Self::Predicate(is_valid) => {
                if is_valid(input) {
                    Ok(())
                } else {
                    Err(INVALID_INPUT.to_string())
                }
            }
            Self::Filters(filters) => Sanitize::execute(input, filters).map_err(|e| e.to_string()),
        }
    }
}

/// Asks for a single string and keeps asking until it passes validation.
///
/// Renders like a [`Menu`] (title, then header) but lists no options, only
/// the `> ` input marker.
///
/// # Example
/// ```rust,no_run
/// use menukit::{Console, Prompt};
///
/// let mut name = Prompt::with_validation("Your name:", |s| !s.is_empty());
/// let answer = name.get(&mut Console::stdio()).unwrap();
/// println!("Hello, {}", answer);
/// ```
pub struct Prompt<'a> {
    inner: Menu<'a>,
    validation: Validation<'a>,
}

impl<'a> Prompt<'a> {
    /// A prompt that accepts any input.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::with_validation(prompt, |_| true)
    }

    /// A prompt that only accepts input for which `is_valid` returns `true`.
    pub fn with_validation(
        prompt: impl Into<String>,
        is_valid: impl Fn(&str) -> bool + 'a,
    ) -> Self {
        Self {
            inner: Menu::new(prompt),
            validation: Validation::Predicate(Box::new(is_valid)),
        }
    }

    /// A prompt that only accepts input passing every filter. A rejection
    /// shows the failing filter's message.
    pub fn with_filters(prompt: impl Into<String>, filters: Vec<Sanitize>) -> Self {
        Self {
            inner: Menu::new(prompt),
            validation: Validation::Filters(filters),
        }
    }

    pub fn set_header(
        &mut self,
        header: impl Fn(&mut dyn Write) -> io::Result<()> + 'a,
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

    /// Clears the display, then reads until the input is valid.
    pub fn get(&mut self, console: &mut Console) -> Result<String, MenuError> {
        console.clear()?;
        let mut input = self.inner.read_string_with(console, Layout::InputOnly)?;

        while let Err(message) = self.validation.check(&input) {
            trace!(%input, "rejected prompt input");
            let error = console.theme().error;
            write!(console.output(), "{}{}\n{}", error, message, Style::Reset)?;
            input = self.inner.read_string_with(console, Layout::InputOnly)?;
        }

        console.clear()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DesiredType;
    use crate::utils::style::CLEAR_SCREEN;
    use crate::utils::terminal::testing::{SharedBuffer, scripted};

    #[test]
    fn test_prompt_rejects_until_valid() {
        let mut prompt = Prompt::with_validation("Name:", |s| !s.is_empty());
        let (mut console, out) = scripted("\n\nhello\n");

        assert_eq!(prompt.get(&mut console).unwrap(), "hello");
        assert_eq!(out.contents().matches(INVALID_INPUT).count(), 2);
    }

    #[test]
    fn test_prompt_rejects_invalid_utf8() {
        let mut prompt = Prompt::with_validation("Name:", |s| !s.is_empty() && s.is_ascii());
        let out = SharedBuffer::default();
        let input = io::Cursor::new(b"\xff\xfe\nok\n".to_vec());
        let mut console = Console::new(input, out.clone());

        assert_eq!(prompt.get(&mut console).unwrap(), "ok");
        assert_eq!(out.contents().matches(INVALID_INPUT).count(), 1);
    }

    #[test]
    fn test_prompt_default_accepts_anything() {
        let mut prompt = Prompt::new("Anything:");
        let (mut console, out) = scripted("\n");
        assert_eq!(prompt.get(&mut console).unwrap(), "");
        assert!(!out.contents().contains(INVALID_INPUT));
    }

    #[test]
    fn test_prompt_render_has_no_options() {
        let mut prompt = Prompt::new("Title");
        prompt.set_header(|out| write!(out, "context"));
        let (mut console, out) = scripted("x\n");
        prompt.get(&mut console).unwrap();

        let expected = format!(
            "{CLEAR_SCREEN}Title\n{}context{}\n{}> \n{CLEAR_SCREEN}",
            Style::Yellow,
            Style::Reset,
            Style::Reset
        );
        assert_eq!(out.contents(), expected);
        assert!(!out.contents().contains("0. Exit"));
    }

    #[test]
    fn test_prompt_filters_show_filter_message() {
        let mut prompt = Prompt::with_filters(
            "Threads:",
            vec![Sanitize::IsType(DesiredType::U8), Sanitize::IsBetween(1, 16)],
        );
        let (mut console, out) = scripted("many\n99\n8\n");

        assert_eq!(prompt.get(&mut console).unwrap(), "8");
        assert!(out.contents().contains("The value is not a u8, try again!"));
        assert!(
            out.contents()
                .contains("The value is not between 1 and 16, try again!")
        );
        assert!(!out.contents().contains(INVALID_INPUT));
    }

    #[test]
    fn test_prompt_input_closed() {
        let mut prompt = Prompt::with_validation("Name:", |s| s == "never");
        let (mut console, _) = scripted("nope\n");
        assert!(matches!(
            prompt.get(&mut console),
            Err(MenuError::InputClosed)
        ));
    }
}
