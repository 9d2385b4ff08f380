//! Logging configuration
//!
//! Settings come from defaults, an optional YAML file, and a few
//! environment variables:
//! - `LOGGER_STYLE`: default console style (`compact` or `normal`)
//! - `LOGGER_DIR`: directory for daily log files
//! - `LOGGER_COLOR`: color override, read when a style is applied

mod settings;
mod file;

pub use settings::{LoggingConfig, DIR_ENV, STYLE_ENV};
