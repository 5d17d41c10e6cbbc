//! # Text Styling
//!
//! ANSI foreground colors used when rendering menus, and the [`Theme`] that
//! decides which color goes where.
//!
//! Styles are plain tokens: writing one to a stream switches the foreground
//! color until a [`Style::Reset`] is written.
//!
//! ## Example
//! ```rust
//! use menukit::utils::{Style, Theme};
//!
//! let theme = Theme::default();
//! let line = format!("{}1. Start{}", theme.option, Style::Reset);
//! assert_eq!(line, "\x1b[36m1. Start\x1b[0m");
//! ```
use std::{fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ANSI sequence that wipes the visible screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// A foreground color (or the reset code) applied to an output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Style {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Style {
    /// Returns the escape sequence for this style.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Reset => "\x1b[0m",
            Self::Black => "\x1b[30m",
            Self::Red => "\x1b[31m",
            Self::Green => "\x1b[32m",
            Self::Yellow => "\x1b[33m",
            Self::Blue => "\x1b[34m",
            Self::Magenta => "\x1b[35m",
            Self::Cyan => "\x1b[36m",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a style name is not one of the known colors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown style `{0}`, expected one of: reset, black, red, green, yellow, blue, magenta, cyan")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [Style; 8] = [
            Style::Reset,
            Style::Black,
            Style::Red,
            Style::Green,
            Style::Yellow,
            Style::Blue,
            Style::Magenta,
            Style::Cyan,
        ];

        let wanted = s.trim().to_ascii_lowercase();
        ALL.into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// Which [`Style`] each part of a rendered menu uses.
///
/// - `header`: wraps the header renderer output (only when the menu has a title).
/// - `option`: numbered options `1..n`.
/// - `exit`: the reserved option `0` (Exit/Back).
/// - `error`: "Invalid option." / "Invalid input." messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    pub header: Style,
    pub option: Style,
    pub exit: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::Yellow,
            option: Style::Cyan,
            exit: Style::Magenta,
            error: Style::Red,
        }
    }
}
