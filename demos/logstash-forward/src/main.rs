//! Minimal routing host: reads lines from stdin and forwards each one as a
//! log record through the adapter selected by `--route`.
//!
//! ```text
//! $ docker logs -f web 2>&1 | logstash-forward \
//!     --route logstash+tcp://logstash.local:5000 \
//!     --container-name web --image nginx
//! ```
//!
//! Set `DEBUG=1` to see per-message diagnostics.

mod cli;

use clap::Parser;
use log::{info, LevelFilter};
use logspout_logstash::prelude::*;
use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("DEBUG").is_some_and(|v| !v.is_empty()) {
        builder.filter_module("logspout_logstash", LevelFilter::Debug);
    }
    builder.init();
}

/// Read one line, without its `\n` or `\r\n`, replacing invalid UTF-8.
///
/// Returns `None` at end of input.
fn read_line_lossy<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

fn main() {
    init_logging();
    let args = cli::Args::parse();

    let route = Route::parse(args.route()).unwrap_or_else(|e| {
        eprintln!("Invalid route: {e}");
        std::process::exit(1);
    });

    let adapters = AdapterRegistry::with_defaults();
    let transports = TransportRegistry::with_defaults();

    let mut adapter = adapters.build(&route, &transports).unwrap_or_else(|e| {
        eprintln!("Failed to create adapter for {route}: {e}");
        std::process::exit(1);
    });
    info!("Forwarding stdin to {route} with the {} adapter", adapter.name());

    let container = Container {
        id: args.container_id.clone(),
        name: args.container_name.clone(),
        config: ContainerConfig {
            image: args.image.clone(),
            hostname: args.hostname.clone(),
        },
    };

    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || adapter.stream(rx));

    let mut stdin = io::stdin().lock();
    let mut buf = Vec::new();
    loop {
        let line = match read_line_lossy(&mut stdin, &mut buf) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Failed to read stdin: {e}");
                break;
            }
        };
        if tx
            .send(LogRecord::new(container.clone(), args.source.as_str(), line))
            .is_err()
        {
            break;
        }
    }
    drop(tx);

    if worker.join().is_err() {
        eprintln!("Forwarder thread panicked");
        std::process::exit(1);
    }
    info!("Input closed, stopped forwarding");
}
