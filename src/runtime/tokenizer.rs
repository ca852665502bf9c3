//! # Command line tokenizer
//!
//! Splits a single line of input into an upper-cased identifier and a
//! sequence of parameters, honoring double-quoted tokens with
//! backslash-escaping inside them.
use crate::error::Error;

/// A tokenized command line: the identifier (already upper-cased) and its
/// parameters (verbatim, case and byte content preserved).
#[derive(Debug, PartialEq, Eq)]
pub struct Tokens {
    /// The command identifier, upper-cased.
    pub identifier: String,
    /// The parameters, in order, exactly as they appeared between
    /// delimiters.
    pub params: Vec<String>,
}

/// Parses `line` into an identifier and its parameters.
///
/// See the module documentation for the exact escaping rules. An empty or
/// whitespace-only line, an unterminated quote, or a stray backslash
/// outside a quoted string are all parse errors.
pub fn tokenize(line: &str) -> Result<Tokens, Error> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_current = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(Error::InvalidCommandLine),
                },
                '"' => {
                    in_quotes = false;
                    words.push(std::mem::take(&mut current));
                    has_current = false;
                }
                other => current.push(other),
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    has_current = true;
                }
                '\\' => return Err(Error::InvalidCommandLine),
                c if c.is_whitespace() => {
                    if has_current {
                        words.push(std::mem::take(&mut current));
                        has_current = false;
                    }
                }
                other => {
                    current.push(other);
                    has_current = true;
                }
            }
        }
    }

    if in_quotes {
        return Err(Error::InvalidCommandLine);
    }
    if has_current {
        words.push(current);
    }

    if words.is_empty() {
        return Err(Error::InvalidCommandLine);
    }

    let identifier = words.remove(0).to_uppercase();
    Ok(Tokens {
        identifier,
        params: words,
    })
}
