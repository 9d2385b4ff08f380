//! The central logger and its convenience functions
//!
//! One well-known logger that any code can throw messages at without
//! setting anything up first.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::file_logger::daily_log_path;
use super::handle::LoggerHandle;
use super::handler::attach_file_sink;
use super::level::Level;
use super::record::{now, Location};
use super::registry::{self, Registry};
use crate::error::LogResult;

/// Lazily created logger with a fixed name
pub struct CentralLogger {
    registry: Arc<Registry>,
    name: String,
    logger: Mutex<Option<LoggerHandle>>,
}

impl std::fmt::Debug for CentralLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CentralLogger")
            .field("name", &self.name)
            .field("initialized", &self.logger.lock().is_some())
            .finish()
    }
}

impl CentralLogger {
    pub fn new(registry: Arc<Registry>, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
            logger: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the central logger, re-applying the threshold from `verbose`
    ///
    /// The last caller's flag wins.
    pub fn get(&self, verbose: bool) -> LoggerHandle {
        let mut slot = self.logger.lock();
        let logger = self.registry.get_logger(Some(&self.name), verbose);
        *slot = Some(logger.clone());
        logger
    }

    /// Get the central logger without changing its threshold
    ///
    /// Creates it non-verbose on first use.
    pub fn current(&self) -> LoggerHandle {
        let mut slot = self.logger.lock();
        slot.get_or_insert_with(|| self.registry.get_logger(Some(&self.name), false))
            .clone()
    }

    /// Also write the central logger to `<dir>/<name>_<YYYYMMDD>.log`, with
    /// the name lowercased (`central_20240101.log`)
    ///
    /// Calling it again with the same directory keeps the one file sink.
    /// [`CentralLogger::reset`] detaches it.
    pub fn enable_file_logging(&self, dir: impl AsRef<Path>) -> LogResult<PathBuf> {
        let logger = self.current();
        let path = daily_log_path(dir, &self.name.to_lowercase(), now());
        attach_file_sink(&logger, &path)?;
        Ok(path)
    }

    pub fn is_initialized(&self) -> bool {
        self.logger.lock().is_some()
    }

    /// Forget the logger and strip its sinks and level, so the next call
    /// starts from scratch
    pub fn reset(&self) {
        if let Some(logger) = self.logger.lock().take() {
            logger.clear_sinks();
            logger.clear_level();
        }
    }
}

static CENTRAL: Lazy<CentralLogger> = Lazy::new(|| {
    let registry = registry::global();
    let name = registry.config().central_name;
    CentralLogger::new(registry, name)
});

/// The process-wide central logger holder
pub fn central() -> &'static CentralLogger {
    &CENTRAL
}

/// Get the central logger with the threshold set from `verbose`
pub fn get_central_logger(verbose: bool) -> LoggerHandle {
    CENTRAL.get(verbose)
}

/// Send the process-wide central logger to a daily file under the
/// configured log directory as well as the console
pub fn enable_central_file_logging() -> LogResult<PathBuf> {
    let dir = CENTRAL.registry.config().log_dir;
    CENTRAL.enable_file_logging(dir)
}

/// Reset the process-wide central logger
pub fn reset_central_logger() {
    CENTRAL.reset();
}

#[track_caller]
fn log_central(level: Level, message: &str) {
    CENTRAL.current().log_at(level, message, Location::caller());
}

/// Log a debug message to the central logger
#[track_caller]
pub fn log_debug(message: &str) {
    log_central(Level::Debug, message);
}

/// Log an info message to the central logger
#[track_caller]
pub fn log_info(message: &str) {
    log_central(Level::Info, message);
}

/// Log a warning to the central logger
#[track_caller]
pub fn log_warning(message: &str) {
    log_central(Level::Warning, message);
}

/// Log an error to the central logger
#[track_caller]
pub fn log_error(message: &str) {
    log_central(Level::Error, message);
}

/// Log a critical message to the central logger
#[track_caller]
pub fn log_critical(message: &str) {
    log_central(Level::Critical, message);
}
