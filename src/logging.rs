//! Log file setup
//!
//! The TUI owns the terminal, so tracing output goes to a file. The filter
//! comes from `BEATVIDEO_LOG` (EnvFilter syntax) and defaults to `info`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "BEATVIDEO_LOG";

const DEFAULT_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "beatvideo.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not determine a data directory for the log file")]
    NoLogDirectory,
    #[error("Could not open log file: {0}")]
    Io(#[from] io::Error),
    #[error("Could not install log subscriber: {0}")]
    Init(String),
}

/// Default log location inside the platform data directory
pub fn default_log_path() -> Result<PathBuf, LoggingError> {
    let project_dirs =
        ProjectDirs::from("", "", "beatvideo").ok_or(LoggingError::NoLogDirectory)?;
    Ok(project_dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating it and its parent directories
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to `path`, or the default location
///
/// Returns the path actually used.
pub fn init(path: Option<&Path>) -> Result<PathBuf, LoggingError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path()?,
    };
    let file = open_log_file(&path)?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(path)
}
