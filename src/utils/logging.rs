//! Logging system initialization
//!
//! Logs go to `navbar.log` in the application data directory
//! (%APPDATA%\WalletNavbar). Each start moves the previous sessions one slot
//! down (`navbar.log.1` .. `navbar.log.9`).

use crate::config::ConfigManager;
use crate::error::{NavbarError, Result, StringError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// File name prefix and suffix of the current log
const LOG_PREFIX: &str = "navbar";
const LOG_SUFFIX: &str = "log";

/// Number of previous sessions kept next to the current log
const MAX_LOG_FILES: u8 = 9;

/// Path of the current session's log file inside `log_dir`
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("{LOG_PREFIX}.{LOG_SUFFIX}"))
}

/// Initialize file logging in the application data directory
///
/// Level defaults to INFO and follows `RUST_LOG` when set.
pub fn init_logging() -> Result<()> {
    init_logging_in(&ConfigManager::app_dir())
}

/// Initialize file logging in `log_dir`
pub fn init_logging_in(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;
    rotate_logs(&log_file_path(log_dir))?;

    // Rotation happens once per start above; the appender itself never rolls.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(log_dir)
        .map_err(|e| NavbarError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| NavbarError::ConfigError(Box::new(e)))?;

    tracing::info!("wallet-navbar v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Shift previous session logs and move the current log to `.1`
///
/// The `.9` log is deleted. Gaps in the sequence are kept as they are. Nothing
/// happens when there is no current log.
fn rotate_logs(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let numbered = |n: u8| -> Result<PathBuf> {
        let mut name = log_path
            .file_name()
            .ok_or_else(|| NavbarError::ConfigError(StringError::new("Invalid log filename")))?
            .to_os_string();
        name.push(format!(".{n}"));
        Ok(log_path.with_file_name(name))
    };

    let oldest = numbered(MAX_LOG_FILES)?;
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for n in (1..MAX_LOG_FILES).rev() {
        let from = numbered(n)?;
        if from.exists() {
            std::fs::rename(&from, numbered(n + 1)?)?;
        }
    }

    std::fs::rename(log_path, numbered(1)?)?;
    Ok(())
}
