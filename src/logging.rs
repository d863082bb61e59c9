//! Tracing setup
//!
//! The terminal belongs to the UI, so log output never goes to stdout or
//! stderr. When a log file is configured, events are written to it through
//! a non-blocking appender; otherwise no subscriber is installed and the
//! engine's `tracing` calls are no-ops.

use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a file-backed subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. The returned guard
/// flushes buffered lines when dropped; keep it alive until exit.
pub fn init_tracing(log_file: Option<&Path>, default_level: &str) -> io::Result<Option<WorkerGuard>> {
    let Some(path) = log_file else {
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init()
        .map_err(|err| io::Error::other(err.to_string()))?;

    Ok(Some(guard))
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
