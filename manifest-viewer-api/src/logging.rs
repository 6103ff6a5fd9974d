///! Logging configuration module
///! Console output plus an optional rolling JSON log file

use crate::config::LoggingSettings;
use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "manifest-viewer.log";

/// Build the env filter: `RUST_LOG` wins over the configured level
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Plain stderr subscriber for events emitted while configuration is still
/// loading, before [`init`] knows the configured level and format
pub fn bootstrap() -> impl tracing::Subscriber + Send + Sync {
    fmt()
        .with_env_filter(env_filter("info"))
        .with_target(true)
        .with_writer(io::stderr)
        .finish()
}

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process.
pub fn init(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    // Console layer, JSON when running under a log collector
    let console_layer = if settings.json_format {
        fmt::layer()
            .with_target(true)
            .with_writer(io::stdout)
            .json()
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .with_writer(io::stdout)
            .boxed()
    };

    let (file_layer, guard) = if settings.file_logging_enabled {
        std::fs::create_dir_all(&settings.log_dir)?;
        let file_appender = rolling::daily(&settings.log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .json()
            .with_writer(writer);

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter(&settings.level))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        level = %settings.level,
        file_logging = settings.file_logging_enabled,
        "Logging initialized"
    );

    Ok(guard)
}
