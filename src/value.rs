//! # Value
//!
//! The two shapes a keyspace entry can take, plus the absolute-time
//! expiration every entry carries alongside its payload.
pub mod sorted_set;

use sorted_set::SortedSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall clock, in whole seconds since the Unix epoch.
///
/// All expiry comparisons go through this single function so that tests can
/// reason about a single definition of "now".
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The payload of a keyspace entry: either a scalar string or a sorted set.
#[derive(Debug, Clone)]
pub enum Value {
    /// A textual payload, optionally interpretable as an integer by `INCR`.
    Scalar(String),
    /// A score-ordered set of members.
    OrderedSet(Arc<SortedSet>),
}

impl Value {
    /// Short name used in `Error::WrongType` contexts and debug output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::OrderedSet(_) => "sorted_set",
        }
    }
}

/// A keyspace entry: a [`Value`] plus its absolute expiration.
///
/// `expiry == 0` means "never expires"; any other value is Unix seconds past
/// which the entry is no longer live.
#[derive(Debug, Clone)]
pub struct StoredValue {
    pub(crate) value: Value,
    pub(crate) expiry: u64,
}

impl StoredValue {
    /// Wraps `value` with an expiration. `expiry == 0` means "never".
    pub fn new(value: Value, expiry: u64) -> Self {
        Self { value, expiry }
    }

    /// Whether this entry is live at the current instant: `expiry == 0` or
    /// `expiry` is still in the future.
    pub fn is_live(&self) -> bool {
        self.expiry == 0 || self.expiry > now()
    }

    /// Borrows the underlying value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The absolute expiry (0 = never).
    pub fn expiry(&self) -> u64 {
        self.expiry
    }
}
