//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "dbtc.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/dbt-console/logs/` so they never
/// interfere with the terminal UI. Log level is controlled by the
/// `DBTC_LOG` environment variable.
///
/// # Examples
/// ```bash
/// DBTC_LOG=debug dbtc
/// DBTC_LOG=dbtc_api=trace,info dbtc
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter = EnvFilter::try_from_env("DBTC_LOG").unwrap_or_else(|_| {
        EnvFilter::new("dbt_console=info,dbtc_app=info,dbtc_api=info,dbtc_tui=info,warn")
    });

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

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("dbt-console starting (v{})", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("dbt-console").join("logs")
}

/// Path of the (non-dated) log file name inside the log directory
pub fn current_log_file() -> PathBuf {
    get_log_directory().join(LOG_FILE_NAME)
}
