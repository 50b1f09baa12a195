use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Overrides the log directory when set.
pub const LOG_DIR_ENV: &str = "DOXTREE_LOG_DIR";

fn resolve_log_dir(explicit: Option<OsString>, home: Option<OsString>) -> PathBuf {
    if let Some(dir) = explicit.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    let home = home.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".doxtree").join("logs")
}

pub fn log_dir() -> PathBuf {
    resolve_log_dir(std::env::var_os(LOG_DIR_ENV), std::env::var_os("HOME"))
}

pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    init_logging_in(&log_dir(), component, to_stderr)
}

/// Installs the global subscriber, writing `{component}.log.<date>` under `dir`.
pub fn init_logging_in(dir: &Path, component: &str, to_stderr: bool) -> WorkerGuard {
    let _ = std::fs::create_dir_all(dir);

    let file_appender = tracing_appender::rolling::daily(dir, format!("{component}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        // A second init in the same process keeps the first subscriber.
        let _ = registry.with(stderr_layer).try_init();
    } else {
        let _ = registry.try_init();
    }

    guard
}
