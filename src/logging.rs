//! Tracing setup
//!
//! Command-line runs log to stderr. The TUI owns the terminal, so while it is
//! running logs are appended to a file in the config directory instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "tally_cli=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initializes the global tracing subscriber writing to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    });
}

/// Initializes the global tracing subscriber writing to `log_file`.
///
/// Falls back to stderr logging when the file cannot be opened.
pub fn init_file_tracing(log_file: &Path) {
    let file = OpenOptions::new().create(true).append(true).open(log_file);

    match file {
        Ok(file) => TRACING_INIT.call_once(|| {
            fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }),
        Err(_) => init_tracing(),
    }
}
