//! # Interactive shell
//!
//! A synchronous `read_line` loop over stdin, matching the blocking,
//! thread-oriented concurrency model the rest of the runtime assumes. It
//! holds no state beyond the prompt and whatever it's connected to.
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";

/// Something a shell line can be sent to: either an in-process [`Runtime`]
/// (`standalone` mode) or a remote HTTP server (`client` mode).
///
/// [`Runtime`]: crate::runtime::Runtime
pub trait Backend {
    /// Executes `line` and returns its result sequence, already rendered as
    /// the text the shell should print (empty means "nothing to print").
    fn execute(&self, line: &str) -> String;
}

impl Backend for crate::runtime::Runtime {
    fn execute(&self, line: &str) -> String {
        self.execute(line).join(" ")
    }
}

/// Runs the interactive loop against `backend` until `EXIT` or EOF.
pub fn run<B: Backend>(backend: &B) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", PROMPT);
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        match trimmed.to_uppercase().as_str() {
            "EXIT" => break,
            "HELP" => {
                for text in crate::runtime::Runtime::help_texts() {
                    println!("{}", text);
                }
            }
            _ => {
                let rendered = backend.execute(trimmed);
                if !rendered.is_empty() {
                    println!("{}", rendered);
                }
            }
        }

        print!("{}", PROMPT);
        stdout.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;

    #[test]
    fn backend_impl_joins_results_with_spaces() {
        let runtime = Runtime::new();
        assert_eq!(Backend::execute(&runtime, "SET foo bar"), "OK");
        assert_eq!(Backend::execute(&runtime, "GET foo"), "bar");
    }
}
