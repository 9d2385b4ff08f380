//! Formatting styles
//!
//! A [`Style`] is the caller-facing policy (compact or normal). Attaching it
//! to a sink resolves it into a [`Formatter`]: the color decision is made
//! once, at that point, so rendering a record is a pure function.

use std::env;
use std::fmt;
use std::io::{self, IsTerminal};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use time::macros::format_description;

use super::level::Level;
use super::record::Record;

/// Environment variable overriding color auto-detection
pub const COLOR_ENV: &str = "LOGGER_COLOR";

/// Default width of the name column in the compact style
pub const DEFAULT_NAME_WIDTH: usize = 18;

/// Narrowest name column the compact style will truncate to
pub const MIN_NAME_WIDTH: usize = 6;

const RESET: &str = "\x1b[0m";

/// Whether the compact style should emit ANSI colors
///
/// Deserializes permissively: `auto`, any on/off toggle, or a YAML bool or
/// number; anything else is `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Use `LOGGER_COLOR` if set, otherwise color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Decide against the real environment and stdout
    pub fn resolve(self) -> bool {
        let toggle = env::var(COLOR_ENV).ok();
        resolve_color(self, toggle.as_deref(), io::stdout().is_terminal())
    }

    /// `auto`, else an on/off toggle, else `Auto`
    pub fn from_name(name: &str) -> Self {
        match Self::parse_toggle(name) {
            Some(true) => Self::Always,
            Some(false) => Self::Never,
            None => Self::Auto,
        }
    }

    /// Parse an on/off toggle; anything unrecognized is `None`
    pub fn parse_toggle(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "on" | "yes" | "always" => Some(true),
            "0" | "false" | "off" | "no" | "never" => Some(false),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ColorChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChoiceVisitor;

        impl<'de> Visitor<'de> for ChoiceVisitor {
            type Value = ColorChoice;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a color choice")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ColorChoice, E> {
                Ok(ColorChoice::from_name(value))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<ColorChoice, E> {
                Ok(if value {
                    ColorChoice::Always
                } else {
                    ColorChoice::Never
                })
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<ColorChoice, E> {
                Ok(ColorChoice::from_name(&value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<ColorChoice, E> {
                Ok(ColorChoice::from_name(&value.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<ColorChoice, E> {
                Ok(ColorChoice::Auto)
            }
        }

        deserializer.deserialize_any(ChoiceVisitor)
    }
}

/// Color decision: explicit choice, then the environment toggle, then the
/// terminal check
pub fn resolve_color(choice: ColorChoice, toggle: Option<&str>, is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => toggle
            .and_then(ColorChoice::parse_toggle)
            .unwrap_or(is_terminal),
    }
}

/// Line layout policy for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `HH:MM:SS L Name: message`
    Compact { name_width: usize, color: ColorChoice },
    /// `YYYY-MM-DD HH:MM:SS,mmm - name - LEVEL - message`, never colored
    Normal,
}

impl Default for Style {
    fn default() -> Self {
        Self::compact()
    }
}

impl Style {
    pub fn compact() -> Self {
        Style::Compact {
            name_width: DEFAULT_NAME_WIDTH,
            color: ColorChoice::Auto,
        }
    }

    pub fn normal() -> Self {
        Style::Normal
    }

    /// Set the compact name column width (clamped to [`MIN_NAME_WIDTH`]).
    /// No effect on the normal style.
    pub fn with_name_width(self, width: usize) -> Self {
        match self {
            Style::Compact { color, .. } => Style::Compact {
                name_width: width.max(MIN_NAME_WIDTH),
                color,
            },
            Style::Normal => Style::Normal,
        }
    }

    /// Set the compact color choice. No effect on the normal style.
    pub fn with_color(self, color: ColorChoice) -> Self {
        match self {
            Style::Compact { name_width, .. } => Style::Compact { name_width, color },
            Style::Normal => Style::Normal,
        }
    }

    /// Look a style up by name, falling back to compact for anything unknown
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "normal" => Style::Normal,
            _ => Style::compact(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Compact { .. } => "compact",
            Style::Normal => "normal",
        }
    }

    /// Resolve into a formatter for a console sink
    pub fn formatter(&self) -> Formatter {
        match *self {
            Style::Compact { name_width, color } => Formatter::Compact {
                name_width: name_width.max(MIN_NAME_WIDTH),
                color: color.resolve(),
            },
            Style::Normal => Formatter::Normal { location: false },
        }
    }

    pub fn render(&self, record: &Record) -> String {
        self.formatter().format(record)
    }
}

/// A resolved style: renders records into lines (without the newline)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    Compact { name_width: usize, color: bool },
    /// Normal layout; `location` adds `file:line - function()`
    Normal { location: bool },
}

impl Formatter {
    /// Formatter used by every file sink
    pub fn file() -> Self {
        Formatter::Normal { location: true }
    }

    pub fn format(&self, record: &Record) -> String {
        match *self {
            Formatter::Compact { name_width, color } => {
                let time = record
                    .timestamp
                    .format(format_description!("[hour]:[minute]:[second]"))
                    .unwrap_or_else(|_| "??:??:??".to_string());
                let code = record.level.code();
                let name = shorten_name(&record.logger, name_width);

                if color {
                    let paint = level_color(record.level);
                    format!(
                        "{} {}{}{} {}{}{}: {}",
                        time, paint, code, RESET, paint, name, RESET, record.message
                    )
                } else {
                    format!("{} {} {}: {}", time, code, name, record.message)
                }
            }
            Formatter::Normal { location } => {
                let time = record
                    .timestamp
                    .format(format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
                    ))
                    .unwrap_or_else(|_| "????-??-?? ??:??:??,???".to_string());

                if location {
                    format!(
                        "{} - {} - {} - {}:{} - {}() - {}",
                        time,
                        record.logger,
                        record.level,
                        record.location.file_name(),
                        record.location.line,
                        record.location.function_name(),
                        record.message
                    )
                } else {
                    format!(
                        "{} - {} - {} - {}",
                        time, record.logger, record.level, record.message
                    )
                }
            }
        }
    }
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Debug => "\x1b[90m",
        Level::Info => "\x1b[37m",
        Level::Warning => "\x1b[33m",
        Level::Error => "\x1b[31m",
        Level::Critical => "\x1b[35m",
    }
}

/// Last dotted segment of `name`, cut to `width` characters with a
/// trailing ellipsis when longer
fn shorten_name(name: &str, width: usize) -> String {
    let width = width.max(MIN_NAME_WIDTH);
    let base = name.rsplit('.').next().unwrap_or(name);
    if base.chars().count() <= width {
        return base.to_string();
    }
    let mut short: String = base.chars().take(width - 1).collect();
    short.push('…');
    short
}
