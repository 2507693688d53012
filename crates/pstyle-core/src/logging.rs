//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ResultExt};
use crate::locate::APP_DIR_NAME;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PSTYLE_LOG";

const LOG_FILE_NAME: &str = "pstyle.log";

/// Initialize the logging subsystem
///
/// Logs are written to `<data_local_dir>/personal-styles/logs/` so that
/// command output on stdout stays machine-readable.
/// Log level is controlled by the `PSTYLE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// PSTYLE_LOG=debug pstyle verify
/// PSTYLE_LOG=pstyle_core=trace pstyle list dark
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    // Default to info for our crates, allow override via PSTYLE_LOG
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("pstyle=info,pstyle_core=info,pstyle_app=info,warn"));

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

    tracing::debug!("Personal Styles {} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Directory holding the daily log files (`pstyle.log.YYYY-MM-DD`)
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR_NAME).join("logs")
}
