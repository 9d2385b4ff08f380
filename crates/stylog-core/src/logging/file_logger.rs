//! Console plus optional daily file logging for one named logger

use std::path::{Path, PathBuf};
use std::sync::Arc;

use time::OffsetDateTime;

use super::handle::LoggerHandle;
use super::handler::{apply_style, attach_file_sink};
use super::level::Level;
use super::record::{date_stamp, now, Location};
use super::registry::{self, Registry};
use super::sink::Sink;
use super::style::Style;
use crate::error::LogResult;

/// Construction options for [`Logger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerOptions {
    pub name: String,
    /// DEBUG when set, otherwise INFO (or `level`)
    pub verbose: bool,
    /// Threshold to use when not verbose
    pub level: Option<Level>,
    pub log_to_file: bool,
    /// Directory for the daily log file; defaults to the registry config
    pub log_dir: Option<PathBuf>,
    /// Exact file to log to, overriding the daily file name
    pub log_file_path: Option<PathBuf>,
}

impl LoggerOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbose: false,
            level: None,
            log_to_file: false,
            log_dir: None,
            log_file_path: None,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn log_to_file(mut self, log_to_file: bool) -> Self {
        self.log_to_file = log_to_file;
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn log_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file_path = Some(path.into());
        self
    }
}

/// `<dir>/<name>_<YYYYMMDD>.log`
pub fn daily_log_path(dir: impl AsRef<Path>, name: &str, at: OffsetDateTime) -> PathBuf {
    dir.as_ref().join(format!("{}_{}.log", name, date_stamp(at)))
}

/// A named logger with a console sink and, optionally, a file sink
///
/// The console sink follows whatever style is set; the file sink always
/// writes the detailed normal layout with source locations.
///
/// # Example
///
/// ```no_run
/// use stylog_core::logging::Logger;
///
/// let service = Logger::new("MyService", false, true)?;
/// service.info("started");
/// # Ok::<(), stylog_core::LogError>(())
/// ```
#[derive(Debug)]
pub struct Logger {
    registry: Arc<Registry>,
    logger: LoggerHandle,
    log_file_path: Option<PathBuf>,
}

impl Logger {
    /// Create a logger in the global registry
    pub fn new(name: &str, verbose: bool, log_to_file: bool) -> LogResult<Self> {
        Self::with_options(
            LoggerOptions::new(name)
                .verbose(verbose)
                .log_to_file(log_to_file),
        )
    }

    pub fn with_options(options: LoggerOptions) -> LogResult<Self> {
        Self::in_registry(registry::global(), options)
    }

    /// Create a logger in a specific registry
    ///
    /// Fails if the log directory cannot be created or the file cannot be
    /// opened.
    pub fn in_registry(registry: Arc<Registry>, options: LoggerOptions) -> LogResult<Self> {
        let logger = registry.get_logger(Some(&options.name), options.verbose);
        if let (false, Some(level)) = (options.verbose, options.level) {
            logger.set_level(level);
        }

        let log_file_path = if options.log_to_file {
            let path = match options.log_file_path {
                Some(path) => path,
                None => {
                    let dir = options
                        .log_dir
                        .unwrap_or_else(|| registry.config().log_dir);
                    daily_log_path(dir, &options.name, now())
                }
            };
            attach_file_sink(&logger, &path)?;
            Some(path)
        } else {
            None
        };

        Ok(Self {
            registry,
            logger,
            log_file_path,
        })
    }

    pub fn name(&self) -> &str {
        self.logger.name()
    }

    /// The configured logger
    pub fn get_logger(&self) -> LoggerHandle {
        self.logger.clone()
    }

    /// Logger named `<name>.<module>`; it has no sinks of its own and writes
    /// through this logger's
    pub fn child(&self, module: &str) -> LoggerHandle {
        self.registry.get(&format!("{}.{}", self.name(), module))
    }

    /// File this logger appends to, if file logging is on
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }

    /// Change the console style; the file sink keeps its layout
    pub fn set_style(&self, style: &Style) {
        apply_style(&self.logger, style);
    }

    /// Change the threshold by level name
    pub fn set_level(&self, level: &str) -> LogResult<()> {
        self.set_threshold(level.parse()?);
        Ok(())
    }

    /// Change the threshold of the logger and of each of its own sinks
    pub fn set_threshold(&self, level: Level) {
        self.logger.set_level(level);
        for sink in self.logger.sinks() {
            sink.set_threshold(level);
        }
    }

    /// Attach a custom sink, replacing one of the same kind
    pub fn add_sink(&self, sink: Sink) -> Arc<Sink> {
        self.logger.replace_sink(sink)
    }

    pub fn remove_all_sinks(&self) {
        self.logger.clear_sinks();
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.logger.is_enabled_for(level)
    }

    /// Log with an explicit call-site, so the logging macros accept a `Logger`
    pub fn log_at(&self, level: Level, message: &str, location: Location) {
        self.logger.log_at(level, message, location);
    }

    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.logger.debug(message);
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.logger.info(message);
    }

    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.logger.warning(message);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.logger.error(message);
    }

    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.logger.critical(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use crate::error::LogError;
    use crate::logging::sink::{MemoryWriter, SinkKind};
    use crate::logging::style::{ColorChoice, Formatter};
    use std::fs;
    use tempfile::tempdir;
    use time::macros::datetime;

    fn registry_in(dir: &Path) -> Arc<Registry> {
        Arc::new(Registry::with_config(LoggingConfig {
            log_dir: dir.to_path_buf(),
            color: ColorChoice::Never,
            ..LoggingConfig::default()
        }))
    }

    #[test]
    fn test_daily_log_path() {
        let path = daily_log_path("logs", "MyService", datetime!(2025-01-09 08:00 +00:00));
        assert_eq!(path, Path::new("logs").join("MyService_20250109.log"));
    }

    #[test]
    fn test_log_to_file_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");
        assert!(!logs.exists());

        let service = Logger::in_registry(
            registry_in(&logs),
            LoggerOptions::new("MyService").log_to_file(true),
        )
        .unwrap();

        let expected = daily_log_path(&logs, "MyService", now());
        assert_eq!(service.log_file_path(), Some(expected.as_path()));
        assert!(logs.is_dir());

        service.info("first");
        service.warning("second");
        service.debug("not emitted");

        let content = fs::read_to_string(&expected).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" - MyService - INFO - file_logger.rs:"));
        assert!(lines[1].contains(" - MyService - WARNING - file_logger.rs:"));
        assert!(lines[1].ends_with("<unknown>() - second"));
    }

    #[test]
    fn test_console_only_by_default() {
        let dir = tempdir().unwrap();
        let service =
            Logger::in_registry(registry_in(dir.path()), LoggerOptions::new("NoFile")).unwrap();
        assert!(service.log_file_path().is_none());
        assert_eq!(service.get_logger().sink_count(SinkKind::File), 0);
        assert_eq!(service.get_logger().sink_count(SinkKind::Console), 1);
    }

    #[test]
    fn test_explicit_file_path_and_level() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom").join("central.log");
        let service = Logger::in_registry(
            registry_in(dir.path()),
            LoggerOptions::new("Custom")
                .level(Level::Warning)
                .log_to_file(true)
                .log_file_path(&path),
        )
        .unwrap();

        assert_eq!(service.get_logger().level(), Some(Level::Warning));
        service.info("dropped");
        service.error("kept");
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_unwritable_log_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, "file in the way").unwrap();

        let err = Logger::in_registry(
            registry_in(&blocker),
            LoggerOptions::new("Broken").log_to_file(true),
        )
        .unwrap_err();
        assert!(matches!(err, LogError::CreateDir { .. }));
    }

    #[test]
    fn test_set_style_leaves_file_formatter() {
        let dir = tempdir().unwrap();
        let service = Logger::in_registry(
            registry_in(dir.path()),
            LoggerOptions::new("Styled").log_to_file(true),
        )
        .unwrap();

        service.set_style(&Style::Normal);
        let logger = service.get_logger();
        assert_eq!(
            logger.sink(SinkKind::Console).unwrap().formatter(),
            Formatter::Normal { location: false }
        );
        assert_eq!(logger.sink(SinkKind::File).unwrap().formatter(), Formatter::file());
        assert_eq!(logger.sink_count(SinkKind::Console), 1);
    }

    #[test]
    fn test_set_level() {
        let dir = tempdir().unwrap();
        let service = Logger::in_registry(
            registry_in(dir.path()),
            LoggerOptions::new("Leveled").verbose(true),
        )
        .unwrap();
        let output = MemoryWriter::new();
        service.add_sink(Sink::console_to(output.clone()));

        service.set_level("error").unwrap();
        assert_eq!(service.get_logger().level(), Some(Level::Error));
        assert_eq!(
            service.get_logger().sink(SinkKind::Console).unwrap().threshold(),
            Level::Error
        );

        service.warning("dropped");
        service.critical("kept");
        assert_eq!(output.lines().len(), 1);

        let err = service.set_level("loud").unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel(_)));
        assert_eq!(service.get_logger().level(), Some(Level::Error));
    }

    #[test]
    fn test_factory_call_after_set_level_reopens_sinks() {
        let dir = tempdir().unwrap();
        let registry = registry_in(dir.path());
        let service =
            Logger::in_registry(Arc::clone(&registry), LoggerOptions::new("Svc")).unwrap();
        let output = MemoryWriter::new();
        service.add_sink(Sink::console_to(output.clone()));
        service.set_level("ERROR").unwrap();

        registry.get_logger(Some("Svc"), true).debug("visible again");
        assert_eq!(output.lines().len(), 1);
        assert_eq!(
            service.get_logger().sink(SinkKind::Console).unwrap().threshold(),
            Level::Debug
        );
    }

    #[test]
    fn test_child_writes_through_parent() {
        let dir = tempdir().unwrap();
        let registry = registry_in(dir.path());
        let service = Logger::in_registry(
            Arc::clone(&registry),
            LoggerOptions::new("Svc").verbose(true),
        )
        .unwrap();
        let output = MemoryWriter::new();
        service.add_sink(Sink::console_to(output.clone()));

        let child = service.child("Db");
        assert_eq!(child.name(), "Svc.Db");
        assert_eq!(child, registry.get("Svc.Db"));
        assert!(child.sinks().is_empty());

        child.debug("query");
        assert_eq!(output.lines().len(), 1);
    }

    #[test]
    fn test_macros_accept_logger() {
        let dir = tempdir().unwrap();
        let service = Logger::in_registry(
            registry_in(dir.path()),
            LoggerOptions::new("Macros").log_to_file(true),
        )
        .unwrap();

        crate::warning!(service, "retry {} of {}", 2, 3);
        let content = fs::read_to_string(service.log_file_path().unwrap()).unwrap();
        assert!(content.contains(" - Macros - WARNING - file_logger.rs:"));
        assert!(content.contains(" - test_macros_accept_logger() - retry 2 of 3"));
    }

    #[test]
    fn test_remove_all_sinks() {
        let dir = tempdir().unwrap();
        let service = Logger::in_registry(
            registry_in(dir.path()),
            LoggerOptions::new("Bare").log_to_file(true),
        )
        .unwrap();
        assert_eq!(service.get_logger().sinks().len(), 2);
        service.remove_all_sinks();
        assert!(service.get_logger().sinks().is_empty());
    }
}
