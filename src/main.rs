use arc_kv::{config::Config, http, runtime::Runtime, shell};
use log::info;
use std::{
    env,
    io::{Read, Write},
    net::TcpStream,
    sync::Arc,
    thread,
    time::Duration,
};

const SWEEP_INTERVAL: Duration = Duration::from_secs(30);

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("server") if args.len() == 2 => run_server(),
        Some("standalone") if args.len() == 2 => run_standalone(),
        Some("client") if args.len() == 2 => run_client(),
        _ => {
            eprintln!("usage: arc-kv <client|server|standalone>");
            std::process::exit(1);
        }
    }
}

fn run_standalone() {
    let runtime = Arc::new(Runtime::new());
    spawn_sweeper_thread(runtime.clone());
    if let Err(err) = shell::run(runtime.as_ref()) {
        eprintln!("shell error: {}", err);
        std::process::exit(1);
    }
}

fn run_server() {
    let config = Config::from_env();
    let runtime = Arc::new(Runtime::new());

    let tokio_runtime = tokio::runtime::Runtime::new().expect("failed to start async runtime");
    tokio_runtime.block_on(async move {
        spawn_sweeper(runtime.clone());
        if let Err(err) = http::serve(&config.http_addr, runtime).await {
            eprintln!("server error: {}", err);
            std::process::exit(1);
        }
    });
}

fn spawn_sweeper(runtime: Arc<Runtime>) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(SWEEP_INTERVAL).await;
            let reclaimed = runtime.store().sweep_expired();
            if reclaimed > 0 {
                info!("sweeper reclaimed {} expired key(s)", reclaimed);
            }
        }
    });
}

/// Same sweeper as [`spawn_sweeper`], for `standalone` mode, which runs no
/// async executor of its own — a plain OS thread instead of a tokio task.
fn spawn_sweeper_thread(runtime: Arc<Runtime>) {
    thread::spawn(move || loop {
        thread::sleep(SWEEP_INTERVAL);
        let reclaimed = runtime.store().sweep_expired();
        if reclaimed > 0 {
            info!("sweeper reclaimed {} expired key(s)", reclaimed);
        }
    });
}

/// Sends each shell line as `GET /?cmd=<line>` to a locally running
/// `server` instance, rather than executing it in-process.
struct RemoteBackend {
    addr: String,
}

impl shell::Backend for RemoteBackend {
    fn execute(&self, line: &str) -> String {
        match self.request(line) {
            Ok(body) => body,
            Err(err) => format!("Error: {}", err),
        }
    }
}

impl RemoteBackend {
    fn request(&self, line: &str) -> std::io::Result<String> {
        let mut stream = TcpStream::connect(&self.addr)?;
        let path = format!("/?cmd={}", encode(line));
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            path, self.addr
        );
        stream.write_all(request.as_bytes())?;

        let mut response = String::new();
        stream.read_to_string(&mut response)?;

        Ok(response
            .split("\r\n\r\n")
            .nth(1)
            .unwrap_or_default()
            .to_owned())
    }
}

fn encode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' ' => "%20".to_owned(),
            c if c.is_ascii_alphanumeric() => c.to_string(),
            c => format!("%{:02X}", c as u32),
        })
        .collect()
}

fn run_client() {
    let config = Config::from_env();
    let backend = RemoteBackend {
        addr: config.http_addr,
    };
    if let Err(err) = shell::run(&backend) {
        eprintln!("shell error: {}", err);
        std::process::exit(1);
    }
}
