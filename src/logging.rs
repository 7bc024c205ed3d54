//! Structured file logging
//!
//! Logs go to a JSON-lines file in the data directory so stdout stays free
//! for command output.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("Failed to create log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to install subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the log filter, preferring RUST_LOG over the configured level
fn log_filter(rust_log: Option<String>, default_level: &str) -> Result<EnvFilter, LogInitError> {
    let directives = rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_level.to_string());
    Ok(EnvFilter::try_new(directives)?)
}

/// Install the global subscriber writing to `log_path`
///
/// The returned guard flushes buffered lines on drop and must be held
/// for the life of the process.
pub fn init(log_path: &Path, default_level: &str) -> Result<WorkerGuard, LogInitError> {
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "firmware-resolver.log".into());
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = log_filter(std::env::var("RUST_LOG").ok(), default_level)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()?;

    Ok(guard)
}
