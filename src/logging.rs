//! File logging through `tracing`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

pub const DEFAULT_LOG_FILE: &str = "taskboard.log";

/// Route `tracing` output to a file. The terminal belongs to the UI, so
/// nothing is ever written to stdout. Hold the returned guard until exit so
/// buffered lines get flushed.
pub fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join(DEFAULT_LOG_FILE);
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let installed = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .try_init();
    if installed.is_err() {
        return None;
    }

    Some(guard)
}
