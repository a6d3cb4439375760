//! Logging Infrastructure
//!
//! Console logging (pretty or JSON) plus an optional daily rotating file.
//! `RUST_LOG` takes precedence over the configured level.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use shared::{AppError, AppResult};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// File name prefix of the rotating log; the appender adds `.YYYY-MM-DD`
pub const LOG_FILE_PREFIX: &str = "purchasing.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize console logging at `info`
pub fn init_logger() -> AppResult<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON console output instead of the pretty format
/// * `log_dir` - Optional directory for the daily rotating log file
///
/// Fails when the log directory cannot be created or a global subscriber
/// is already installed.
pub fn init_logger_with_file(level: &str, json_format: bool, log_dir: Option<&str>) -> AppResult<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    };
    layers.push(console_layer);

    if let Some(dir) = log_dir {
        let dir = Path::new(dir);
        fs::create_dir_all(dir).map_err(|e| {
            AppError::config(format!("Cannot create log directory {}: {e}", dir.display()))
                .with_detail("field", "LOG_DIR")
        })?;

        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        // Files are always JSON so they can be shipped as-is
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file_appender))
            .with_filter(env_filter(level))
            .boxed();
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| AppError::internal(format!("Failed to install logger: {e}")))?;

    tracing::debug!(level, json_format, log_dir = ?log_dir, "Logger initialized");
    Ok(())
}

/// Delete rotated log files older than `keep_days`
///
/// Returns the number of deleted files. Files whose name does not carry a
/// date suffix are left alone.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64) -> std::io::Result<usize> {
    cleanup_logs_before(log_dir, Local::now().date_naive() - chrono::Duration::days(keep_days))
}

fn cleanup_logs_before(log_dir: &Path, cutoff: NaiveDate) -> std::io::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name
            .strip_prefix(LOG_FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            deleted += 1;
        }
    }

    Ok(deleted)
}
