//! Logger registry and factory
//!
//! Names are dot-separated. A logger's parent is its nearest registered
//! ancestor, or the root logger. Registering an intermediate name later
//! moves existing descendants under it.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::file_logger::daily_log_path;
use super::handle::LoggerHandle;
use super::handler::{apply_style, attach_file_sink};
use super::level::Level;
use super::record::now;
use crate::config::LoggingConfig;
use crate::error::LogResult;

/// Name of the root logger
pub const ROOT_LOGGER_NAME: &str = "root";

/// Name the factory uses when none is given
pub const DEFAULT_LOGGER_NAME: &str = "Logger";

/// Maps names to logger instances
pub struct Registry {
    root: LoggerHandle,
    loggers: RwLock<HashMap<String, LoggerHandle>>,
    config: RwLock<LoggingConfig>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("loggers", &self.loggers.read().len())
            .field("config", &*self.config.read())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::with_config(LoggingConfig::default())
    }

    pub fn with_config(config: LoggingConfig) -> Self {
        Self {
            root: LoggerHandle::new(ROOT_LOGGER_NAME, Some(Level::Warning), None),
            loggers: RwLock::new(HashMap::new()),
            config: RwLock::new(config),
        }
    }

    pub fn root(&self) -> LoggerHandle {
        self.root.clone()
    }

    pub fn config(&self) -> LoggingConfig {
        self.config.read().clone()
    }

    /// Replace the configuration used by later factory calls
    pub fn set_config(&self, config: LoggingConfig) {
        *self.config.write() = config;
    }

    /// Look up or create the logger called `name`
    ///
    /// Does not touch levels or sinks. An empty name or `"root"` is the root
    /// logger.
    pub fn get(&self, name: &str) -> LoggerHandle {
        if name.is_empty() || name == ROOT_LOGGER_NAME {
            return self.root();
        }

        if let Some(existing) = self.loggers.read().get(name) {
            return existing.clone();
        }

        let mut loggers = self.loggers.write();
        // Another caller may have created it between the two locks
        if let Some(existing) = loggers.get(name) {
            return existing.clone();
        }

        let parent = nearest_ancestor(&loggers, name).unwrap_or_else(|| self.root());
        let logger = LoggerHandle::new(name, None, Some(parent));

        let prefix = format!("{}.", name);
        for (other, descendant) in loggers.iter() {
            if !other.starts_with(&prefix) {
                continue;
            }
            let reparent = descendant
                .parent()
                .map_or(true, |p| !p.name().starts_with(&prefix));
            if reparent {
                descendant.set_parent(Some(logger.clone()));
            }
        }

        loggers.insert(name.to_string(), logger.clone());
        logger
    }

    /// The registered logger for `name`, else its nearest registered
    /// ancestor, else the root. Never registers anything.
    pub fn lookup(&self, name: &str) -> LoggerHandle {
        if name.is_empty() || name == ROOT_LOGGER_NAME {
            return self.root();
        }
        let loggers = self.loggers.read();
        loggers
            .get(name)
            .cloned()
            .or_else(|| nearest_ancestor(&loggers, name))
            .unwrap_or_else(|| self.root())
    }

    /// Factory: look up or create a logger, set its level from `verbose`, and
    /// give it one console sink in the configured default style
    ///
    /// Without a name the logger is [`DEFAULT_LOGGER_NAME`], not the root, so
    /// named loggers do not also print through it. Repeated calls with the
    /// same name return the same logger and re-apply level and style without
    /// adding sinks. The thresholds of the logger's own sinks are reset to
    /// the new level as well.
    pub fn get_logger(&self, name: Option<&str>, verbose: bool) -> LoggerHandle {
        let logger = self.get(name.unwrap_or(DEFAULT_LOGGER_NAME));
        let level = Level::from_verbose(verbose);
        logger.set_level(level);
        apply_style(&logger, &self.config.read().default_style());
        for sink in logger.sinks() {
            sink.set_threshold(level);
        }
        logger
    }

    /// Like [`Registry::get_logger`], plus a file sink at
    /// `<log_dir>/<name>_<YYYYMMDD>.log`
    pub fn get_file_logger(&self, name: &str, verbose: bool) -> LogResult<LoggerHandle> {
        let logger = self.get_logger(Some(name), verbose);
        let path = daily_log_path(self.config.read().log_dir.clone(), name, now());
        attach_file_sink(&logger, &path)?.set_threshold(Level::from_verbose(verbose));
        Ok(logger)
    }

    pub fn contains(&self, name: &str) -> bool {
        name == ROOT_LOGGER_NAME || self.loggers.read().contains_key(name)
    }

    /// Names of all registered loggers except the root
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

fn nearest_ancestor(loggers: &HashMap<String, LoggerHandle>, name: &str) -> Option<LoggerHandle> {
    let mut end = name.len();
    while let Some(dot) = name[..end].rfind('.') {
        if let Some(found) = loggers.get(&name[..dot]) {
            return Some(found.clone());
        }
        end = dot;
    }
    None
}

// Global registry instance
static GLOBAL_REGISTRY: Lazy<Arc<Registry>> =
    Lazy::new(|| Arc::new(Registry::with_config(LoggingConfig::default().with_env_overrides())));

/// The process-wide registry
pub fn global() -> Arc<Registry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Replace the configuration of the global registry
pub fn configure(config: LoggingConfig) {
    GLOBAL_REGISTRY.set_config(config);
}

/// Get a configured logger from the global registry
///
/// See [`Registry::get_logger`].
pub fn get_logger(name: Option<&str>, verbose: bool) -> LoggerHandle {
    GLOBAL_REGISTRY.get_logger(name, verbose)
}

/// Get a configured logger with a daily file sink from the global registry
///
/// See [`Registry::get_file_logger`].
pub fn get_file_logger(name: &str, verbose: bool) -> LogResult<LoggerHandle> {
    GLOBAL_REGISTRY.get_file_logger(name, verbose)
}
