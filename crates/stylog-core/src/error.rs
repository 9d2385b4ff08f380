//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring loggers
///
/// Emitting a record never fails; these only come out of configuration
/// calls such as attaching a file sink or changing a level by name.
#[derive(Error, Debug)]
pub enum LogError {
    /// The log directory could not be created
    #[error("Failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened for appending
    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unknown level name
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A global `log` logger was already installed
    #[error("Log facade already installed: {0}")]
    Facade(#[from] log::SetLoggerError),
}

impl LogError {
    /// Create a directory creation error
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create a file open error
    pub fn open_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OpenFile {
            path: path.into(),
            source,
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;
