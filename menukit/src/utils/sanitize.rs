//! # Input Sanitization & Validation
//!
//! Composable filters for [`crate::Prompt`] input. Filters run in order and
//! stop at the first failure, whose message is shown to the user before the
//! prompt asks again.
//!
//! ## Features
//! - Non-empty input with [`Sanitize::NonEmpty`]
//! - Type validation for common Rust primitives via [`DesiredType`]
//! - Exact string matching with [`Sanitize::MatchString`]
//! - Multiple-option matching with [`Sanitize::MatchStrings`]
//! - Inclusive range validation with [`Sanitize::IsBetween`]
//!
//! ## Example
//! ```rust,no_run
//! use menukit::{Console, Prompt};
//! use menukit::utils::{DesiredType, Sanitize};
//!
//! let mut threads = Prompt::with_filters(
//!     "Worker threads (1-16):",
//!     vec![Sanitize::IsType(DesiredType::U8), Sanitize::IsBetween(1, 16)],
//! );
//! let answer = threads.get(&mut Console::stdio()).unwrap();
//! println!("Threads: {}", answer);
//! ```
use std::{fmt::Display, str::FromStr};

/// A validation filter applied to prompt input.
///
/// - `NonEmpty`: rejects the empty string.
/// - `MatchString`: the input must equal the given string.
/// - `MatchStrings`: the input must equal one of the given options.
/// - `IsType`: the input must parse as the given [`DesiredType`].
/// - `IsBetween`: the input must be an integer within `[min, max]`.
#[derive(Debug, Clone)]
pub enum Sanitize {
    NonEmpty,
    MatchString(String),
    MatchStrings(Vec<String>),
    IsType(DesiredType),
    IsBetween(isize, isize),
}

/// Why a [`Sanitize`] filter rejected the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("The value is empty, try again!")]
    Empty,

    #[error("The value is not a {0}, try again!")]
    NotType(DesiredType),

    #[error("The value doesn't match with {0}, try again!")]
    MatchString(String),

    #[error("The value doesn't match with the options: {}, try again!", .0.join(", "))]
    MatchStrings(Vec<String>),

    #[error("The value is not between {0} and {1}, try again!")]
    Between(isize, isize),
}

impl Sanitize {
    /// Checks `input` against this single filter.
    pub fn validate(&self, input: &str) -> Result<(), FilterError> {
        match self {
            Sanitize::NonEmpty => {
                if input.is_empty() {
                    Err(FilterError::Empty)
                } else {
                    Ok(())
                }
            }
            Sanitize::MatchString(s) => {
                if input == s {
                    Ok(())
                } else {
                    Err(FilterError::MatchString(s.clone()))
                }
            }
            Sanitize::MatchStrings(options) => {
                if options.iter().any(|o| o == input) {
                    Ok(())
                } else {
                    Err(FilterError::MatchStrings(options.clone()))
                }
            }
            Sanitize::IsType(ty) => ty.check(input),
            Sanitize::IsBetween(min, max) => {
                let n: isize = input
                    .parse()
                    .map_err(|_| FilterError::NotType(DesiredType::Isize))?;
                if (*min..=*max).contains(&n) {
                    Ok(())
                } else {
                    Err(FilterError::Between(*min, *max))
                }
            }
        }
    }

    /// Runs every filter in order, returning the first failure.
    pub fn execute(input: &str, filters: &[Sanitize]) -> Result<(), FilterError> {
        filters.iter().try_for_each(|filter| filter.validate(input))
    }
}

/// A primitive type the input must parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
    F64,
}

fn parses<T: FromStr>(input: &str) -> bool {
    input.parse::<T>().is_ok()
}

impl DesiredType {
    fn check(&self, input: &str) -> Result<(), FilterError> {
        let ok = match self {
            Self::Bool => parses::<bool>(input),
            Self::U8 => parses::<u8>(input),
            Self::U16 => parses::<u16>(input),
            Self::U32 => parses::<u32>(input),
            Self::U64 => parses::<u64>(input),
            Self::Usize => parses::<usize>(input),
            Self::I8 => parses::<i8>(input),
            Self::I16 => parses::<i16>(input),
            Self::I32 => parses::<i32>(input),
            Self::I64 => parses::<i64>(input),
            Self::Isize => parses::<isize>(input),
            Self::F64 => parses::<f64>(input),
        };
        if ok {
            Ok(())
        } else {
            Err(FilterError::NotType(*self))
        }
    }
}

impl Display for DesiredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::F64 => "f64",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_non_empty() {
        assert!(Sanitize::NonEmpty.validate("x").is_ok());
        assert_eq!(Sanitize::NonEmpty.validate(""), Err(FilterError::Empty));
    }

    #[test]
    fn test_sanitize_match_string_fail() {
        let filter = Sanitize::MatchString("hello".to_string());
        assert!(filter.validate("hello").is_ok());
        let res = filter.validate("world");
        if let Err(e) = res {
            assert_eq!(
                format!("{}", e),
                "The value doesn't match with hello, try again!"
            );
        } else {
            panic!("expected a mismatch");
        }
    }

    #[test]
    fn test_sanitize_match_strings_fail() {
        let filter = Sanitize::MatchStrings(vec!["y".to_string(), "n".to_string()]);
        assert!(filter.validate("n").is_ok());
        let e = filter.validate("maybe").unwrap_err();
        assert_eq!(
            e.to_string(),
            "The value doesn't match with the options: y, n, try again!"
        );
    }

    #[test]
    fn test_sanitize_is_type_u8() {
        let filter = Sanitize::IsType(DesiredType::U8);
        assert!(filter.validate("42").is_ok());
        assert!(filter.validate("-42").is_err());
        assert!(filter.validate("256").is_err());
        assert_eq!(
            filter.validate("abc").unwrap_err().to_string(),
            "The value is not a u8, try again!"
        );
    }

    #[test]
    fn test_sanitize_is_type_f64_and_bool() {
        assert!(Sanitize::IsType(DesiredType::F64).validate("2.5").is_ok());
        assert!(Sanitize::IsType(DesiredType::Bool).validate("true").is_ok());
        assert!(Sanitize::IsType(DesiredType::Bool).validate("yes").is_err());
    }

    #[test]
    fn test_sanitize_is_between() {
        let filter = Sanitize::IsBetween(10, 20);
        assert!(filter.validate("10").is_ok());
        assert!(filter.validate("20").is_ok());
        assert_eq!(filter.validate("25"), Err(FilterError::Between(10, 20)));
        assert_eq!(
            filter.validate("ten"),
            Err(FilterError::NotType(DesiredType::Isize))
        );
    }

    #[test]
    fn test_sanitize_execute_stops_at_first_failure() {
        let filters = vec![
            Sanitize::IsType(DesiredType::U8),
            Sanitize::IsType(DesiredType::Bool),
        ];
        let e = Sanitize::execute("true", &filters).unwrap_err();
        assert_eq!(e.to_string(), "The value is not a u8, try again!");
    }

    #[test]
    fn test_sanitize_execute_all_pass() {
        let filters = vec![Sanitize::NonEmpty, Sanitize::IsBetween(1, 3)];
        assert!(Sanitize::execute("2", &filters).is_ok());
        assert!(Sanitize::execute("", &[]).is_ok());
    }
}
