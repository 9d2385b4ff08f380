//! Named loggers, sinks and styles
//!
//! - [`Registry`] maps dotted names to [`LoggerHandle`]s
//! - [`apply_style`] keeps exactly one console sink per logger
//! - [`Logger`] adds daily file logging on top
//! - the central logger backs [`log_info`] and friends

mod level;
mod record;
mod style;
mod sink;
mod handle;
mod handler;
mod registry;
mod file_logger;
mod central;
mod facade;
#[doc(hidden)]
pub mod macros;

pub use level::Level;
pub use record::{date_stamp, now, Location, Record};
pub use style::{
    resolve_color, ColorChoice, Formatter, Style, COLOR_ENV, DEFAULT_NAME_WIDTH, MIN_NAME_WIDTH,
};
pub use sink::{MemoryWriter, Sink, SinkKind};
pub use handle::LoggerHandle;
pub use handler::{apply_style, attach_file_sink, set_logger_style};
pub use registry::{
    configure, get_file_logger, get_logger, global, Registry, DEFAULT_LOGGER_NAME,
    ROOT_LOGGER_NAME,
};
pub use file_logger::{daily_log_path, Logger, LoggerOptions};
pub use central::{
    central, enable_central_file_logging, get_central_logger, log_critical, log_debug, log_error,
    log_info, log_warning, reset_central_logger, CentralLogger,
};
pub use facade::{init_log_facade, LogFacade};
