//! Configuration values and environment overrides

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::{ColorChoice, Style, DEFAULT_NAME_WIDTH};

/// Environment variable selecting the default console style
pub const STYLE_ENV: &str = "LOGGER_STYLE";

/// Environment variable selecting the log directory
pub const DIR_ENV: &str = "LOGGER_DIR";

/// Settings shared by the loggers of one registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory daily log files are written to
    pub log_dir: PathBuf,
    /// Default console style name; unknown names mean compact
    pub style: String,
    /// Compact name column width
    pub name_width: usize,
    /// Compact color choice
    pub color: ColorChoice,
    /// Name of the central logger
    pub central_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            style: "compact".to_string(),
            name_width: DEFAULT_NAME_WIDTH,
            color: ColorChoice::Auto,
            central_name: "CENTRAL".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Style the factory applies to new console sinks
    pub fn default_style(&self) -> Style {
        Style::from_name(&self.style)
            .with_name_width(self.name_width)
            .with_color(self.color)
    }

    /// Apply `LOGGER_STYLE` and `LOGGER_DIR` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any lookup; empty values are ignored
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(style) = lookup(STYLE_ENV) {
            self.style = style.trim().to_string();
        }
        if let Some(dir) = lookup(DIR_ENV) {
            self.log_dir = PathBuf::from(dir);
        }
        self
    }
}
