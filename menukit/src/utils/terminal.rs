//! # Console
//!
//! The I/O context every menu reads from and renders to.
//!
//! A [`Console`] bundles an input stream, an output stream, a way of
//! clearing the display and a way of reading single keystrokes. Menus never
//! touch the process streams directly, so the same menu runs on the real
//! terminal or against scripted input.
//!
//! ## Usage
//!
//! ### Real terminal
//! ```rust,no_run
//! use menukit::{Console, Menu};
//!
//! let mut console = Console::stdio();
//! let mut menu = Menu::new("Main");
//! menu.add_option("Say hi", || println!("hi"));
//! menu.run(&mut console).unwrap();
//! ```
//!
//! ### Scripted input
//! ```rust
//! use menukit::Console;
//! use std::io;
//!
//! let mut console = Console::new(io::Cursor::new("first second\n"), io::sink());
//! assert_eq!(console.read_token().unwrap(), "first");
//! ```
use std::{
    io::{self, BufRead, Write},
    process::Command,
};

use cfg_if::cfg_if;
use tracing::warn;

use crate::error::MenuError;
use crate::utils::raw_mode;
use crate::utils::style::{CLEAR_SCREEN, Theme};

/// How [`Console::clear`] wipes the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Run the host's clear-screen command (`clear`, or `cls` on Windows).
    Native,
    /// Write the ANSI clear sequence to the output stream.
    Ansi,
    /// Leave the display alone.
    Disabled,
}

/// How [`Console::read_key`] gets a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Switch the terminal to raw mode and read one key from stdin.
    Raw,
    /// Take the next byte of the input stream, skipping line breaks.
    Buffered,
}

enum Input {
    Stdin,
    Reader(Box<dyn BufRead>),
}

impl Input {
    /// Raw bytes up to and including the next `\n`.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        match self {
            Self::Stdin => io::stdin().lock().read_until(b'\n', buf),
            Self::Reader(r) => r.read_until(b'\n', buf),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self {
            Self::Stdin => raw_mode::read_byte(&mut io::stdin().lock()),
            Self::Reader(r) => raw_mode::read_byte(r),
        }
    }
}

/// Input, output and screen control shared by every menu of an interaction.
pub struct Console {
    input: Input,
    output: Box<dyn Write>,
    clear: ClearMode,
    keys: KeyMode,
    theme: Theme,
}

impl Console {
    /// A console on the process stdin/stdout.
    ///
    /// Stdin is locked per read, so prompts started from inside a menu
    /// action can build their own `Console::stdio()` safely.
    pub fn stdio() -> Self {
        Self {
            input: Input::Stdin,
            output: Box::new(io::stdout()),
            clear: ClearMode::Native,
            keys: KeyMode::Raw,
            theme: Theme::default(),
        }
    }

    /// A console over arbitrary streams.
    ///
    /// Clearing writes the ANSI sequence into `output` and keystrokes are
    /// read from `input`.
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: Input::Reader(Box::new(input)),
            output: Box::new(output),
            clear: ClearMode::Ansi,
            keys: KeyMode::Buffered,
            theme: Theme::default(),
        }
    }

    pub fn with_clear_mode(mut self, clear: ClearMode) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_key_mode(mut self, keys: KeyMode) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The output stream menus render into.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// Clears the display.
    ///
    /// Pending output is flushed first. Failing to start the native clear
    /// command is logged and otherwise ignored.
    pub fn clear(&mut self) -> Result<(), MenuError> {
        self.output.flush()?;
        match self.clear {
            ClearMode::Native => {
                if let Err(e) = clear_native() {
                    warn!(error = %e, "failed to run the clear-screen command");
                }
            }
            ClearMode::Ansi => {
                self.output.write_all(CLEAR_SCREEN.as_bytes())?;
                self.output.flush()?;
            }
            ClearMode::Disabled => {}
        }
        Ok(())
    }

    /// Reads one line and returns its first whitespace-delimited token.
    ///
    /// A blank line yields an empty string. Bytes that are not UTF-8 are
    /// replaced with `U+FFFD`, so they fail validation instead of the read.
    pub fn read_token(&mut self) -> Result<String, MenuError> {
        self.output.flush()?;
        let mut line = Vec::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::InputClosed);
        }
        let line = String::from_utf8_lossy(&line);
        Ok(line.split_whitespace().next().unwrap_or_default().to_string())
    }

    /// Reads a single keystroke.
    pub fn read_key(&mut self) -> Result<char, MenuError> {
        self.output.flush()?;
        match self.keys {
            KeyMode::Raw => raw_mode::read_keystroke()?.ok_or(MenuError::InputClosed),
            KeyMode::Buffered => loop {
                match self.input.read_byte()? {
                    None => return Err(MenuError::InputClosed),
                    Some(b'\n' | b'\r') => continue,
                    Some(byte) => return Ok(char::from(byte)),
                }
            },
        }
    }
}

fn clear_native() -> io::Result<()> {
    cfg_if! {
        if #[cfg(windows)] {
            Command::new("cmd").args(["/C", "cls"]).status()?;
        } else {
            Command::new("clear").status()?;
        }
    }
    Ok(())
}
