//! # Command runtime
//!
//! Ties the tokenizer, the dispatch table, and the standard library
//! together behind a single [`Runtime::execute`] entry point.
pub mod commands;
pub mod tokenizer;

use crate::{db::Store, error::Error};
use log::{debug, trace};
use std::collections::HashMap;

type Handler = fn(&Store, &[String]) -> Result<Vec<String>, Error>;

/// A single library entry: its dispatch key, its declared arity (`-1` for
/// variadic), the handler, and the help text shown by the shell's `HELP`.
struct Entry {
    key: &'static str,
    arity: i32,
    handler: Handler,
    help: &'static str,
}

/// The fixed standard library, in registration order. `HELP` walks this
/// list directly; dispatch walks it once at construction to build the
/// lookup map.
const LIBRARY: &[Entry] = &[
    Entry {
        key: "SET_2",
        arity: 2,
        handler: commands::set,
        help: "SET key value",
    },
    Entry {
        key: "SET_4",
        arity: 4,
        handler: commands::set_with_expiry,
        help: "SET key value EX seconds",
    },
    Entry {
        key: "GET_1",
        arity: 1,
        handler: commands::get,
        help: "GET key",
    },
    Entry {
        key: "DEL",
        arity: -1,
        handler: commands::del,
        help: "DEL key [key...]",
    },
    Entry {
        key: "DBSIZE_0",
        arity: 0,
        handler: commands::dbsize,
        help: "DBSIZE",
    },
    Entry {
        key: "INCR_1",
        arity: 1,
        handler: commands::incr,
        help: "INCR key",
    },
    Entry {
        key: "ZADD",
        arity: -1,
        handler: commands::zadd,
        help: "ZADD key score member [score member...]",
    },
    Entry {
        key: "ZCARD_1",
        arity: 1,
        handler: commands::zcard,
        help: "ZCARD key",
    },
    Entry {
        key: "ZRANK_2",
        arity: 2,
        handler: commands::zrank,
        help: "ZRANK key member",
    },
    Entry {
        key: "ZRANGE_3",
        arity: 3,
        handler: commands::zrange,
        help: "ZRANGE key start stop",
    },
];

/// The command runtime: an immutable dispatch table over an owned [`Store`].
///
/// Cheap to construct, stateless beyond the store it wraps; safe to share
/// across threads via `Arc<Runtime>` since the store handles its own
/// internal locking.
pub struct Runtime {
    store: Store,
    fixed: HashMap<&'static str, Handler>,
    variadic: HashMap<&'static str, Handler>,
}

impl Runtime {
    /// Builds the dispatch table once and wraps a fresh, empty store.
    pub fn new() -> Self {
        let mut fixed = HashMap::new();
        let mut variadic = HashMap::new();

        for entry in LIBRARY {
            if entry.arity < 0 {
                variadic.insert(entry.key, entry.handler);
            } else {
                fixed.insert(entry.key, entry.handler);
            }
        }

        Self {
            store: Store::new(),
            fixed,
            variadic,
        }
    }

    /// The store backing this runtime, exposed for the sweeper and for
    /// interfaces (HTTP, REST) that need direct access beyond `execute`.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Every library entry's help string, in registration order, for the
    /// shell's `HELP` command. Not itself a dispatched command.
    pub fn help_texts() -> impl Iterator<Item = &'static str> {
        LIBRARY.iter().map(|entry| entry.help)
    }

    /// Tokenizes and dispatches `line`, returning the result sequence.
    ///
    /// Parse and dispatch failures are rendered as single-element sentinel
    /// sequences rather than propagated as a typed error, matching the
    /// in-band error model callers expect from `execute`.
    pub fn execute(&self, line: &str) -> Vec<String> {
        let tokens = match tokenizer::tokenize(line) {
            Ok(tokens) => tokens,
            Err(err) => return err.into_result(),
        };

        trace!("dispatching {} ({} params)", tokens.identifier, tokens.params.len());

        match self.dispatch(&tokens.identifier, tokens.params.len()) {
            Some(handler) => handler(&self.store, &tokens.params).unwrap_or_else(|err| {
                debug!("{} failed: {}", tokens.identifier, err);
                err.into_result()
            }),
            None => Error::UnknownCommand.into_result(),
        }
    }

    fn dispatch(&self, identifier: &str, arity: usize) -> Option<Handler> {
        let fixed_key = format!("{}_{}", identifier, arity);
        if let Some(handler) = self.fixed.get(fixed_key.as_str()) {
            return Some(*handler);
        }
        self.variadic.get(identifier).copied()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
