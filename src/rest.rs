//! # REST translator
//!
//! Maps a handful of resource-oriented REST endpoints onto the command
//! lines [`crate::runtime::Runtime::execute`] already understands. This is
//! a convenience layer only: every route below compiles to exactly one
//! command line and carries no semantics of its own beyond that.
use std::collections::HashMap;

/// Translates an HTTP `(method, path, query, body)` tuple into a command
/// line, or `None` if no REST route matches.
///
/// `query` holds already-decoded key/value pairs from the URL's query
/// string; `body` is the raw request body, decoded to UTF-8.
pub fn translate(method: &str, path: &str, query: &HashMap<String, String>, body: &str) -> Option<String> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("GET", ["db", "size"]) => Some("DBSIZE".to_owned()),
        ("GET", ["values", key]) => Some(format!("GET {}", key)),
        ("PUT", ["values"]) => translate_set_body(body),
        ("PATCH", ["values", key]) => Some(format!("INCR {}", key)),
        ("DELETE", ["values", key]) => Some(format!("DEL {}", key)),
        ("PUT", ["sets"]) => translate_zadd_body(body),
        ("GET", ["sets", key]) => Some(translate_zrange(key, query)),
        ("GET", ["sets", key, "size"]) => Some(format!("ZCARD {}", key)),
        ("GET", ["sets", key, "rank", member]) => Some(format!("ZRANK {} {}", key, member)),
        _ => None,
    }
}

fn translate_set_body(body: &str) -> Option<String> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    match tokens.as_slice() {
        [key, value] => Some(format!("SET {} {}", key, value)),
        [key, value, seconds] => Some(format!("SET {} {} EX {}", key, value, seconds)),
        _ => None,
    }
}

fn translate_zadd_body(body: &str) -> Option<String> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }
    Some(format!("ZADD {}", tokens.join(" ")))
}

fn translate_zrange(key: &str, query: &HashMap<String, String>) -> String {
    let start = query.get("start").map(String::as_str).unwrap_or("0");
    let stop = query.get("stop").map(String::as_str).unwrap_or("-1");
    format!("ZRANGE {} {} {}", key, start, stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn db_size_route() {
        assert_eq!(
            translate("GET", "/db/size", &q(&[]), ""),
            Some("DBSIZE".to_owned())
        );
    }

    #[test]
    fn get_value_route() {
        assert_eq!(
            translate("GET", "/values/foo", &q(&[]), ""),
            Some("GET foo".to_owned())
        );
    }

    #[test]
    fn put_value_without_expiry() {
        assert_eq!(
            translate("PUT", "/values", &q(&[]), "foo bar"),
            Some("SET foo bar".to_owned())
        );
    }

    #[test]
    fn put_value_with_expiry() {
        assert_eq!(
            translate("PUT", "/values", &q(&[]), "foo bar 30"),
            Some("SET foo bar EX 30".to_owned())
        );
    }

    #[test]
    fn patch_and_delete_value_routes() {
        assert_eq!(
            translate("PATCH", "/values/n", &q(&[]), ""),
            Some("INCR n".to_owned())
        );
        assert_eq!(
            translate("DELETE", "/values/n", &q(&[]), ""),
            Some("DEL n".to_owned())
        );
    }

    #[test]
    fn put_sets_route() {
        assert_eq!(
            translate("PUT", "/sets", &q(&[]), "z 1 a 2 b"),
            Some("ZADD z 1 a 2 b".to_owned())
        );
    }

    #[test]
    fn get_sets_route_defaults_to_full_range() {
        assert_eq!(
            translate("GET", "/sets/z", &q(&[]), ""),
            Some("ZRANGE z 0 -1".to_owned())
        );
    }

    #[test]
    fn get_sets_route_honors_start_and_stop() {
        assert_eq!(
            translate("GET", "/sets/z", &q(&[("start", "1"), ("stop", "2")]), ""),
            Some("ZRANGE z 1 2".to_owned())
        );
    }

    #[test]
    fn get_sets_size_and_rank_routes() {
        assert_eq!(
            translate("GET", "/sets/z/size", &q(&[]), ""),
            Some("ZCARD z".to_owned())
        );
        assert_eq!(
            translate("GET", "/sets/z/rank/a", &q(&[]), ""),
            Some("ZRANK z a".to_owned())
        );
    }

    #[test]
    fn unmatched_route_is_none() {
        assert_eq!(translate("GET", "/nope", &q(&[]), ""), None);
    }

    #[test]
    fn malformed_put_values_body_is_none() {
        assert_eq!(translate("PUT", "/values", &q(&[]), "onlyonetoken"), None);
    }
}
