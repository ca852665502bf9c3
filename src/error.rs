//! # Runtime errors
//!
//! Every error the store or the command runtime can raise, and the exact
//! sentinel string each one renders as when it reaches a caller of
//! [`crate::runtime::Runtime::execute`].
use thiserror::Error;

/// Errors raised while tokenizing or executing a command line.
///
/// The `Display` impl produces the exact sentinel text a caller is expected
/// to see; callers never need to match on the variant, only render it.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum Error {
    /// The tokenizer rejected the input (unterminated quote, stray backslash,
    /// empty line).
    #[error("Error: invalid command line")]
    InvalidCommandLine,
    /// No handler matches `(identifier, arity)`.
    #[error("Error: unknown command or invalid parameters for command")]
    UnknownCommand,
    /// A handler was dispatched to but rejects its own argument shape.
    #[error("Error: invalid parameters")]
    InvalidParameters,
    /// A token failed to parse as the type the command expected, or a
    /// required literal token didn't match (e.g. `EX`).
    #[error("Error: invalid parameter value")]
    InvalidParameterValue,
    /// The value stored at the key is not the type the command requires.
    #[error("Error: invalid data type")]
    WrongType,
}

impl Error {
    /// Renders this error as the single-element result sequence a command
    /// handler returns.
    pub fn into_result(self) -> Vec<String> {
        vec![self.to_string()]
    }
}
