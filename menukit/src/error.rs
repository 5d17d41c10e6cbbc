//! Errors surfaced by menus and prompts.
//!
//! Invalid selections and rejected prompt input are not errors: they are
//! handled by reprompting. Only I/O failures and a closed input stream
//! reach the caller.
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Input closed before a selection was made")]
    InputClosed,
}
