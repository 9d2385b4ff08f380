//! Log records and call-site locations

use time::macros::format_description;
use time::OffsetDateTime;

use super::level::Level;

/// Where a record was emitted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Source path as given by `file!()`
    pub file: &'static str,
    pub line: u32,
    /// Enclosing function, when captured by one of the logging macros
    pub function: Option<&'static str>,
}

impl Location {
    pub fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Location of the caller of the `#[track_caller]` chain
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line(), None)
    }

    /// Base file name without directories
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(self.file)
    }

    pub fn function_name(&self) -> &'static str {
        self.function.unwrap_or("<unknown>")
    }
}

/// A single log event
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    /// Full dotted name of the logger the record originated from
    pub logger: String,
    pub message: String,
    pub timestamp: OffsetDateTime,
    pub location: Location,
}

impl Record {
    /// Create a record stamped with the current time
    pub fn new(
        level: Level,
        logger: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::at(level, logger, message, location, now())
    }

    /// Create a record with an explicit timestamp
    pub fn at(
        level: Level,
        logger: impl Into<String>,
        message: impl Into<String>,
        location: Location,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            level,
            logger: logger.into(),
            message: message.into(),
            timestamp,
            location,
        }
    }
}

/// Current time in the local offset, falling back to UTC when the offset
/// cannot be determined
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `YYYYMMDD` stamp used in daily log file names
pub fn date_stamp(at: OffsetDateTime) -> String {
    at.format(format_description!("[year][month][day]"))
        .unwrap_or_else(|_| "00000000".to_string())
}
