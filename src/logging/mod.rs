//! Application logging functionality
//!
//! Sets up the tracing subscriber and, on request, a daily log file under
//! ~/.config/anchor-tool/logs/

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::core::config_file::ConfigFile;

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    fs::create_dir_all(logs_dir())?;
    Ok(())
}

/// Default filter unless RUST_LOG says otherwise
fn env_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber.
///
/// Logs go to stderr, or to a daily file when `log_to_file` is set. The
/// returned guard must be kept alive until exit so buffered file output is
/// flushed.
pub fn init(verbose: bool, log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    if log_to_file {
        initialize_logs_directory()?;
        let appender = tracing_appender::rolling::daily(logs_dir(), "anchor-tool.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(verbose))
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))?;
        tracing::info!(
            "=== anchor-tool started at {} ===",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))?;
        Ok(None)
    }
}
