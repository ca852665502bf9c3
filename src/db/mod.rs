//! # In-memory store
//!
//! The keyspace: a map from key to [`StoredValue`], each entry behind its
//! own lock so that operations on distinct keys never contend with one
//! another beyond the brief moment the keyspace map itself is touched.
use crate::{
    error::Error,
    value::{now, sorted_set::SortedSet, StoredValue, Value},
};
use log::trace;
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

type Slot = Arc<RwLock<StoredValue>>;

/// The concurrent keyspace.
///
/// The outer [`RwLock`] guards only the shape of the map (which keys exist);
/// it is held briefly, in shared mode for lookups and exclusive mode for
/// insert/remove. Once a slot (`Arc<RwLock<StoredValue>>`) is found, further
/// reads or writes to that entry's type/payload/expiry go through the
/// slot's own lock, so a long-held read on one key never blocks writers on
/// another.
#[derive(Debug, Default)]
pub struct Store {
    keyspace: RwLock<HashMap<String, Slot>>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &str) -> Option<Slot> {
        self.keyspace.read().get(key).cloned()
    }

    /// Returns the value at `key` if present and live.
    pub fn get(&self, key: &str) -> Option<Value> {
        let slot = self.slot(key)?;
        let guard = slot.read();
        guard.is_live().then(|| guard.value().clone())
    }

    /// Returns the scalar payload at `key`, or `""` if absent, expired, or
    /// not a scalar.
    pub fn get_scalar(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::Scalar(text)) => text,
            _ => String::new(),
        }
    }

    /// Returns the sorted set at `key`, if present, live, and of that type.
    pub fn get_sorted_set(&self, key: &str) -> Option<Arc<SortedSet>> {
        match self.get(key) {
            Some(Value::OrderedSet(set)) => Some(set),
            _ => None,
        }
    }

    /// Installs or replaces `key` with a scalar value. Atomic: the type,
    /// payload, and expiry all land together.
    pub fn set_scalar(&self, key: &str, text: impl Into<String>, expiry: u64) {
        self.insert(key, Value::Scalar(text.into()), expiry);
    }

    /// Installs or replaces `key` with a sorted set value.
    pub fn set_sorted_set(&self, key: &str, set: SortedSet, expiry: u64) {
        self.insert(key, Value::OrderedSet(Arc::new(set)), expiry);
    }

    fn insert(&self, key: &str, value: Value, expiry: u64) {
        let stored = Arc::new(RwLock::new(StoredValue::new(value, expiry)));
        let mut keyspace = self.keyspace.write();
        keyspace.insert(key.to_owned(), stored);
    }

    /// Returns the sorted set at `key`, atomically creating an empty one
    /// (expiry 0) if the key is absent. Fails with [`Error::WrongType`] if
    /// the key holds a scalar.
    ///
    /// This is the single atomic step that lets `ZADD` validate-and-create
    /// without a caller-visible race between "check absent" and "insert".
    pub fn get_or_create_sorted_set(&self, key: &str) -> Result<Arc<SortedSet>, Error> {
        let mut keyspace = self.keyspace.write();

        if let Some(slot) = keyspace.get(key) {
            let guard = slot.read();
            if guard.is_live() {
                return match guard.value() {
                    Value::OrderedSet(set) => Ok(set.clone()),
                    Value::Scalar(_) => Err(Error::WrongType),
                };
            }
        }

        let set = Arc::new(SortedSet::new());
        let stored = Arc::new(RwLock::new(StoredValue::new(
            Value::OrderedSet(set.clone()),
            0,
        )));
        keyspace.insert(key.to_owned(), stored);
        Ok(set)
    }

    /// Creates (if absent) or increments the integer scalar at `key` by
    /// one, returning the new value. Returns `ok = false`, leaving the
    /// stored payload untouched, if an existing value isn't a scalar or
    /// doesn't parse as `i64`.
    ///
    /// The find-or-insert step takes the keyspace's exclusive lock just
    /// long enough to locate or create the slot; the numeric mutation then
    /// goes through that slot's own write lock, which is what serializes
    /// concurrent `incr` calls against the *same* key without forcing
    /// unrelated keys to wait on each other.
    pub fn incr(&self, key: &str) -> (i64, bool) {
        let slot = {
            let mut keyspace = self.keyspace.write();
            let needs_fresh = match keyspace.get(key) {
                Some(slot) => !slot.read().is_live(),
                None => true,
            };
            if needs_fresh {
                let fresh = Arc::new(RwLock::new(StoredValue::new(Value::Scalar("0".into()), 0)));
                keyspace.insert(key.to_owned(), fresh.clone());
                fresh
            } else {
                keyspace.get(key).unwrap().clone()
            }
        };

        let mut guard = slot.write();
        let current = match guard.value() {
            Value::Scalar(text) => text.clone(),
            Value::OrderedSet(_) => return (0, false),
        };

        match current.parse::<i64>() {
            Ok(n) => {
                let next = n + 1;
                guard.value = Value::Scalar(next.to_string());
                (next, true)
            }
            Err(_) => (0, false),
        }
    }

    /// Removes each listed key if physically present (regardless of
    /// expiration), returning how many were removed.
    pub fn unset_many(&self, keys: &[String]) -> usize {
        let mut keyspace = self.keyspace.write();
        keys.iter()
            .filter(|key| keyspace.remove(key.as_str()).is_some())
            .count()
    }

    /// Removes `key` if physically present, returning whether it was.
    pub fn unset(&self, key: &str) -> bool {
        self.keyspace.write().remove(key).is_some()
    }

    /// Live-existence check (honors TTL).
    pub fn has(&self, key: &str) -> bool {
        match self.slot(key) {
            Some(slot) => slot.read().is_live(),
            None => false,
        }
    }

    /// Number of live entries. Not O(1): a full scan of the keyspace.
    pub fn size(&self) -> usize {
        self.keyspace
            .read()
            .values()
            .filter(|slot| slot.read().is_live())
            .count()
    }

    /// Scans the keyspace once, physically removing every expired entry.
    /// Returns how many were reclaimed.
    ///
    /// Never required for correctness — every read already treats an
    /// expired entry as absent — but keeps long-running processes from
    /// accumulating dead entries forever.
    pub fn sweep_expired(&self) -> usize {
        let expired: Vec<String> = self
            .keyspace
            .read()
            .iter()
            .filter(|(_, slot)| !slot.read().is_live())
            .map(|(key, _)| key.clone())
            .collect();

        if expired.is_empty() {
            return 0;
        }

        trace!("sweeping {} expired key(s)", expired.len());
        let mut keyspace = self.keyspace.write();
        expired
            .iter()
            .filter(|key| keyspace.remove(key.as_str()).is_some())
            .count()
    }
}

/// Seconds-since-epoch expiry for `seconds_from_now` seconds in the future.
/// `seconds_from_now <= 0` yields an expiry already in the past, which reads
/// as immediately expired rather than "never" (0 is reserved for that).
pub fn expiry_in(seconds_from_now: i64) -> u64 {
    let base = now() as i64;
    (base + seconds_from_now).max(1) as u64
}
