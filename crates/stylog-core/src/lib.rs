//! Stylog Core
//!
//! Named loggers with console and file sinks, and two console styles that
//! can be switched at runtime:
//!
//! - **compact**: `14:07:09 I Database: Connected`
//! - **normal**: `2024-03-05 14:07:09,123 - Database - INFO - Connected`
//!
//! File sinks always use the normal layout plus the source location.
//!
//! ```rust,no_run
//! use stylog_core::{get_logger, set_logger_style, Logger, Style};
//!
//! let db = get_logger(Some("Database"), true);
//! db.debug("Connected");
//!
//! set_logger_style(&db, &Style::normal());
//! db.info("now in the long layout");
//!
//! // Console plus logs/MyService_<YYYYMMDD>.log
//! let service = Logger::new("MyService", false, true)?;
//! stylog_core::warning!(service, "queue depth {}", 128);
//!
//! stylog_core::log_info("anything goes to the central logger");
//! # Ok::<(), stylog_core::LogError>(())
//! ```

pub mod error;
pub mod config;
pub mod logging;

pub use error::{LogError, LogResult};

pub use config::LoggingConfig;

pub use logging::{
    Level, Location, Record,
    Style, Formatter, ColorChoice,
    Sink, SinkKind, MemoryWriter,
    LoggerHandle, Registry, Logger, LoggerOptions, CentralLogger,
    apply_style, set_logger_style, attach_file_sink,
    get_logger, get_file_logger, configure,
    get_central_logger, reset_central_logger, enable_central_file_logging,
    log_debug, log_info, log_warning, log_error, log_critical,
    init_log_facade,
};
