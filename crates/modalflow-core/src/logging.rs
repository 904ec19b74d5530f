//! Logging configuration using tracing
//!
//! The library itself only emits `tracing` events and never installs a
//! subscriber on its own; hosts that want file logging without wiring up
//! their own subscriber can call [`init`] once at startup.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem.
///
/// Logs are written to `~/.local/share/modalflow/logs/`.
/// Log level is controlled by the `MODALFLOW_LOG` environment variable.
///
/// # Examples
/// ```bash
/// MODALFLOW_LOG=debug cargo run
/// MODALFLOW_LOG=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "modalflow.log");

    // Default to info, allow override via MODALFLOW_LOG
    let env_filter = EnvFilter::try_from_env("MODALFLOW_LOG")
        .unwrap_or_else(|_| EnvFilter::new("modalflow=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("modalflow logging initialized");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("modalflow").join("logs")
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> PathBuf {
    get_log_directory().join("modalflow.log")
}
