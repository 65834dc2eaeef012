//! Rolling Logger
//!
//! File logger for the mobile app: rotates by size, keeps a circular buffer of
//! recent lines for in-app diagnostics, and bridges `log` records into
//! `tracing` so both facades end up in the same file.

mod writer;

use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use writer::{RollingFile, RollingPolicy, RollingWriter};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("logger not initialized")]
    NotInitialized,
}

struct Logger {
    app_name: String,
    log_dir: PathBuf,
    writer: RollingWriter,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Local wall-clock timestamps, millisecond precision
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize the global logger with the default rolling policy
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, RollingPolicy::default())
}

/// Initialize the global logger
///
/// Can succeed only once per process; later calls return
/// `LoggerError::AlreadyInitialized`.
pub fn init_logger_with(
    log_dir: PathBuf,
    app_name: &str,
    policy: RollingPolicy,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let file = RollingFile::open(&log_dir, app_name, policy)?;
    let writer = RollingWriter::new(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer.clone())
        .with_timer(LocalTime)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime);

    let registry = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(file_layer)
        .with(stderr_layer);

    // Android routes `log` records to logcat; elsewhere they are bridged into tracing.
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Info)
                .with_tag(app_name),
        );
        tracing::subscriber::set_global_default(registry)
            .map_err(|_| LoggerError::AlreadyInitialized)?;
    }
    #[cfg(not(target_os = "android"))]
    registry
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    LOGGER
        .set(Logger {
            app_name: app_name.to_string(),
            log_dir,
            writer,
        })
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(target: "rolling_logger", "logger started for {}", app_name);
    Ok(())
}

fn logger() -> Result<&'static Logger, LoggerError> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    let logger = logger()?;
    tracing::info!(app = %logger.app_name, "{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    let logger = logger()?;
    tracing::error!(app = %logger.app_name, "{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first
pub fn recent_logs() -> Vec<String> {
    LOGGER.get().map(|l| l.writer.recent()).unwrap_or_default()
}

/// Directory the logger writes to, if initialized
pub fn log_dir() -> Option<PathBuf> {
    LOGGER.get().map(|l| l.log_dir.clone())
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}
