//! # Standard library
//!
//! The fixed set of command handlers, grounded one-to-one in the command
//! table. Each handler receives its already-tokenized parameters (the
//! identifier itself is never part of `params`) and the store, and returns
//! a result sequence or an [`Error`] to be rendered as a sentinel string.
use crate::{
    db::{expiry_in, Store},
    error::Error,
    value::sorted_set::SortedSet,
};

type CmdResult = Result<Vec<String>, Error>;

/// `SET key value` — arity 2.
pub fn set(store: &Store, params: &[String]) -> CmdResult {
    store.set_scalar(&params[0], params[1].clone(), 0);
    Ok(vec!["OK".into()])
}

/// `SET key value EX seconds` — arity 4.
pub fn set_with_expiry(store: &Store, params: &[String]) -> CmdResult {
    if params[2] != "EX" {
        return Err(Error::InvalidParameters);
    }
    let seconds: i64 = params[3]
        .parse()
        .map_err(|_| Error::InvalidParameterValue)?;
    store.set_scalar(&params[0], params[1].clone(), expiry_in(seconds));
    Ok(vec!["OK".into()])
}

/// `GET key` — arity 1.
pub fn get(store: &Store, params: &[String]) -> CmdResult {
    if !store.has(&params[0]) {
        return Ok(vec!["(nil)".into()]);
    }
    Ok(vec![store.get_scalar(&params[0])])
}

/// `DEL key [key...]` — variadic, at least one parameter.
pub fn del(store: &Store, params: &[String]) -> CmdResult {
    if params.is_empty() {
        return Err(Error::InvalidParameters);
    }
    Ok(vec![store.unset_many(params).to_string()])
}

/// `DBSIZE` — arity 0.
pub fn dbsize(store: &Store, _params: &[String]) -> CmdResult {
    Ok(vec![store.size().to_string()])
}

/// `INCR key` — arity 1.
pub fn incr(store: &Store, params: &[String]) -> CmdResult {
    let (value, ok) = store.incr(&params[0]);
    if ok {
        Ok(vec![value.to_string()])
    } else {
        Err(Error::WrongType)
    }
}

/// `ZADD key score member [score member...]` — variadic, arity >= 3 and odd.
pub fn zadd(store: &Store, params: &[String]) -> CmdResult {
    if params.len() < 3 || params.len() % 2 == 0 {
        return Err(Error::InvalidParameters);
    }

    let key = &params[0];
    let pairs = &params[1..];

    let mut parsed: Vec<(f64, &str)> = Vec::with_capacity(pairs.len() / 2);
    for chunk in pairs.chunks(2) {
        let score: f64 = chunk[0]
            .parse()
            .map_err(|_| Error::InvalidParameterValue)?;
        if score.is_nan() {
            return Err(Error::InvalidParameterValue);
        }
        parsed.push((score, chunk[1].as_str()));
    }

    let set = store.get_or_create_sorted_set(key)?;

    let added = parsed
        .into_iter()
        .filter(|(score, member)| set.add(member, *score))
        .count();

    Ok(vec![added.to_string()])
}

/// `ZCARD key` — arity 1.
pub fn zcard(store: &Store, params: &[String]) -> CmdResult {
    let len = store
        .get_sorted_set(&params[0])
        .map(|set| set.len())
        .unwrap_or(0);
    Ok(vec![len.to_string()])
}

/// `ZRANK key member` — arity 2.
pub fn zrank(store: &Store, params: &[String]) -> CmdResult {
    match store.get_sorted_set(&params[0]) {
        Some(set) => {
            let rank = set.rank(&params[1]);
            if rank < 0 {
                Ok(vec!["(nil)".into()])
            } else {
                Ok(vec![rank.to_string()])
            }
        }
        None => Ok(vec!["(nil)".into()]),
    }
}

/// `ZRANGE key start stop` — arity 3.
pub fn zrange(store: &Store, params: &[String]) -> CmdResult {
    let mut start: i64 = params[1]
        .parse()
        .map_err(|_| Error::InvalidParameterValue)?;
    let mut stop: i64 = params[2]
        .parse()
        .map_err(|_| Error::InvalidParameterValue)?;

    let set = match store.get_sorted_set(&params[0]) {
        Some(set) => set,
        None => return Ok(Vec::new()),
    };

    let n = set.len() as i64;
    if n == 0 {
        return Ok(Vec::new());
    }

    if stop < 0 {
        stop += n;
    } else if stop >= n {
        stop = n - 1;
    }
    if start < 0 {
        start = 0;
    }
    if start > stop {
        return Ok(Vec::new());
    }

    let members = (start..=stop)
        .filter_map(|i| set.get(i as usize))
        .map(|entry| entry.member().to_owned())
        .collect();

    Ok(members)
}

/// Unused by the standard library but kept available for handlers that
/// need a fresh, empty set without going through the store (currently
/// none; [`zadd`] always goes through [`Store::get_or_create_sorted_set`]).
#[allow(dead_code)]
pub(crate) fn empty_set() -> SortedSet {
    SortedSet::new()
}
