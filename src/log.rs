// src/log.rs
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};
use crate::file::ensure_directory;

/// Install the global subscriber. Lines go to `.store/debug.log`, or to
/// stderr when that file cannot be opened. Level comes from `RUST_LOG`
/// (default `info`). Calling twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let dir = Path::new(STORE_DIR);
    let file = ensure_directory(dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
    });

    let _ = match file {
        Ok(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).try_init(),
        Err(e) => {
            eprintln!("Warning: cannot open log file, logging to stderr: {e}");
            builder.with_writer(io::stderr).try_init()
        }
    };
}
