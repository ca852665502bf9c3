//! # HTTP front-end
//!
//! A minimal hand-rolled HTTP/1.1 listener: no framework, just a
//! `TcpListener` and enough request parsing to recover a method, a path,
//! a query string, and a body. Every request resolves to a single command
//! line, which is handed to the [`Runtime`] and the result rendered back
//! as the response body.
use crate::{rest, runtime::Runtime};
use log::{info, trace, warn};
use std::{collections::HashMap, sync::Arc};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Binds `addr` and serves HTTP requests against `runtime` until the
/// process is killed.
pub async fn serve(addr: &str, runtime: Arc<Runtime>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    loop {
        let (mut stream, peer) = match listener.accept().await {
            Ok(pair) => pair,
            Err(err) => {
                warn!("accept failed: {}", err);
                continue;
            }
        };

        let runtime = runtime.clone();
        tokio::spawn(async move {
            if let Err(err) = handle(&mut stream, &runtime).await {
                warn!("connection from {} failed: {}", peer, err);
            }
        });
    }
}

async fn handle(
    stream: &mut tokio::net::TcpStream,
    runtime: &Runtime,
) -> std::io::Result<()> {
    let mut buf = vec![0u8; 8192];
    let n = stream.read(&mut buf).await?;
    let request = String::from_utf8_lossy(&buf[..n]);

    let command_line = resolve_command_line(&request);
    trace!("resolved command line: {:?}", command_line);

    let response = match command_line {
        None => respond(400, ""),
        Some(line) => {
            let result = runtime.execute(&line);
            if result.is_empty() {
                respond(500, "")
            } else {
                respond(200, &result.join(" "))
            }
        }
    };

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

fn respond(status: u16, body: &str) -> String {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        _ => "Internal Server Error",
    };
    format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    )
}

/// Parses a raw HTTP request and resolves it to a command line, trying the
/// `?cmd=` passthrough first and falling back to REST translation.
fn resolve_command_line(request: &str) -> Option<String> {
    let mut lines = request.split("\r\n");
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .unwrap_or("")
        .trim_end_matches('\0')
        .to_owned();

    let (path, query) = split_target(target);

    if path == "/" {
        if let Some(cmd) = query.get("cmd").filter(|c| !c.is_empty()) {
            return Some(cmd.clone());
        }
    }

    rest::translate(method, &path, &query, &body)
}

fn split_target(target: &str) -> (String, HashMap<String, String>) {
    match target.split_once('?') {
        Some((path, query)) => (path.to_owned(), parse_query(query)),
        None => (target.to_owned(), HashMap::new()),
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (decode(key), decode(value)))
        .collect()
}

/// Minimal percent-decoding plus `+` as space, enough for `GET /?cmd=...`.
fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '+' => out.push(' '),
            '%' => {
                let hex: String = chars.by_ref().take(2).collect();
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => out.push(byte as char),
                    Err(_) => out.push('%'),
                }
            }
            other => out.push(other),
        }
    }

    out
}
