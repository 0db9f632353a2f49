//! Logging setup
//!
//! The terminal is in alternate-screen mode while the app runs, so logs go to
//! a file. `RUST_LOG` takes precedence over the configured level.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::config::LogConfig;

/// Keeps the background log writer alive; drop it last.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}")),
    }
}

pub fn init(config: &LogConfig) -> Result<LoggingGuard> {
    let path = config.resolved_file();
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_ansi(false)
        .compact()
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(build_filter(&config.level)?)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(file = %path.display(), "logging initialized");

    Ok(LoggingGuard { _file_guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("weather_checker=debug,reqwest=warn").is_ok());
    }
}
