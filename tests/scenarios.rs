//! Exercises the concrete scenarios through the public `Runtime` surface,
//! the same way a shell or HTTP caller would.
use arc_kv::runtime::Runtime;

fn exec(runtime: &Runtime, line: &str) -> Vec<String> {
    runtime.execute(line)
}

#[test]
fn set_get_del_round_trip() {
    let runtime = Runtime::new();
    assert_eq!(exec(&runtime, "SET foo bar"), vec!["OK"]);
    assert_eq!(exec(&runtime, "GET foo"), vec!["bar"]);
    assert_eq!(exec(&runtime, "DEL foo"), vec!["1"]);
    assert_eq!(exec(&runtime, "GET foo"), vec!["(nil)"]);
    assert_eq!(exec(&runtime, "DEL foo"), vec!["0"]);
}

#[test]
fn incr_then_type_mismatch() {
    let runtime = Runtime::new();
    assert_eq!(exec(&runtime, "SET n 41"), vec!["OK"]);
    assert_eq!(exec(&runtime, "INCR n"), vec!["42"]);
    assert_eq!(exec(&runtime, "INCR n"), vec!["43"]);
    assert_eq!(exec(&runtime, "GET n"), vec!["43"]);
    assert_eq!(exec(&runtime, "SET n hello"), vec!["OK"]);
    assert_eq!(exec(&runtime, "INCR n"), vec!["Error: invalid data type"]);
}

#[test]
fn incr_on_absent_key_starts_at_one() {
    let runtime = Runtime::new();
    assert_eq!(exec(&runtime, "INCR visits"), vec!["1"]);
    assert_eq!(exec(&runtime, "INCR visits"), vec!["2"]);
}

#[test]
fn expiry_via_set_ex_honors_clock() {
    let runtime = Runtime::new();
    assert_eq!(exec(&runtime, "SET k v EX 100"), vec!["OK"]);
    assert_eq!(exec(&runtime, "GET k"), vec!["v"]);

    assert_eq!(exec(&runtime, "SET expired v EX -5"), vec!["OK"]);
    assert_eq!(exec(&runtime, "GET expired"), vec!["(nil)"]);
}

#[test]
fn zadd_zcard_zrank_zrange_flow() {
    let runtime = Runtime::new();
    assert_eq!(
        exec(&runtime, r#"ZADD leaderboard 10 alice 20 bob 5 carol"#),
        vec!["3"]
    );
    assert_eq!(exec(&runtime, "ZCARD leaderboard"), vec!["3"]);
    assert_eq!(exec(&runtime, "ZRANK leaderboard alice"), vec!["1"]);
    assert_eq!(
        exec(&runtime, "ZRANGE leaderboard 0 -1"),
        vec!["carol", "alice", "bob"]
    );
}

#[test]
fn zadd_updates_do_not_recount_existing_members() {
    let runtime = Runtime::new();
    assert_eq!(exec(&runtime, "ZADD z 1 a 2 b"), vec!["2"]);
    assert_eq!(exec(&runtime, "ZADD z 99 a 3 c"), vec!["1"]);
    assert_eq!(exec(&runtime, "ZCARD z"), vec!["3"]);
}

#[test]
fn zadd_against_wrong_type_is_invalid_data_type() {
    let runtime = Runtime::new();
    exec(&runtime, "SET z scalar");
    assert_eq!(
        exec(&runtime, "ZADD z 1 a"),
        vec!["Error: invalid data type"]
    );
}

#[test]
fn tokenizer_quoting_scenarios() {
    let runtime = Runtime::new();
    assert_eq!(exec(&runtime, r#"SET x "a b""#), vec!["OK"]);
    assert_eq!(exec(&runtime, "GET x"), vec!["a b"]);

    assert_eq!(
        exec(&runtime, r#"SET x "unterminated"#),
        vec!["Error: invalid command line"]
    );
    assert_eq!(
        exec(&runtime, r"\ SET"),
        vec!["Error: invalid command line"]
    );
    assert_eq!(exec(&runtime, ""), vec!["Error: invalid command line"]);
}

#[test]
fn unknown_command_scenario() {
    let runtime = Runtime::new();
    assert_eq!(
        exec(&runtime, "FROBNICATE x"),
        vec!["Error: unknown command or invalid parameters for command"]
    );
}

#[test]
fn dbsize_tracks_live_keys() {
    let runtime = Runtime::new();
    assert_eq!(exec(&runtime, "DBSIZE"), vec!["0"]);
    exec(&runtime, "SET a 1");
    exec(&runtime, "SET b 2");
    assert_eq!(exec(&runtime, "DBSIZE"), vec!["2"]);
    exec(&runtime, "DEL a");
    assert_eq!(exec(&runtime, "DBSIZE"), vec!["1"]);
}
