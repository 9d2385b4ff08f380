//! Output sinks

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::level::Level;
use super::record::Record;
use super::style::{ColorChoice, Formatter, Style};
use crate::error::{LogError, LogResult};

/// Kind of destination a sink writes to
///
/// A logger holds at most one sink of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    File,
}

/// A destination for formatted log lines
///
/// Each sink owns its formatter and an optional threshold of its own on top
/// of the logger's level. Writes are serialized by the sink's writer lock.
pub struct Sink {
    kind: SinkKind,
    path: Option<PathBuf>,
    threshold: RwLock<Level>,
    formatter: RwLock<Formatter>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("threshold", &*self.threshold.read())
            .field("formatter", &*self.formatter.read())
            .finish()
    }
}

impl Sink {
    /// Console sink on standard output, compact style
    pub fn console() -> Self {
        Self::with_writer(SinkKind::Console, None, Style::compact().formatter(), io::stdout())
    }

    /// Console sink writing to any writer (used to capture output)
    ///
    /// Starts uncolored; the writer is not a terminal.
    pub fn console_to(writer: impl Write + Send + 'static) -> Self {
        let formatter = Style::compact().with_color(ColorChoice::Never).formatter();
        Self::with_writer(SinkKind::Console, None, formatter, writer)
    }

    /// File sink appending to `path`
    ///
    /// Missing parent directories are created. The file formatter is always
    /// used, whatever style the logger's console shows.
    pub fn file(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| LogError::create_dir(parent, e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LogError::open_file(path, e))?;

        Ok(Self::with_writer(
            SinkKind::File,
            Some(path.to_path_buf()),
            Formatter::file(),
            file,
        ))
    }

    fn with_writer(
        kind: SinkKind,
        path: Option<PathBuf>,
        formatter: Formatter,
        writer: impl Write + Send + 'static,
    ) -> Self {
        Self {
            kind,
            path,
            threshold: RwLock::new(Level::Debug),
            formatter: RwLock::new(formatter),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    /// Path of a file sink
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn threshold(&self) -> Level {
        *self.threshold.read()
    }

    pub fn set_threshold(&self, level: Level) {
        *self.threshold.write() = level;
    }

    pub fn formatter(&self) -> Formatter {
        *self.formatter.read()
    }

    /// Swap the formatter in place
    pub fn set_formatter(&self, formatter: Formatter) {
        *self.formatter.write() = formatter;
    }

    /// Format and write one record if it passes this sink's threshold
    pub fn emit(&self, record: &Record) {
        if record.level < self.threshold() {
            return;
        }

        let line = self.formatter().format(record);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

/// In-memory writer for capturing sink output
///
/// Clones share the same buffer, so one clone can be handed to a sink while
/// another is kept to read back what was written.
///
/// # Example
///
/// ```
/// use stylog_core::logging::{MemoryWriter, Sink};
///
/// let output = MemoryWriter::new();
/// let _sink = Sink::console_to(output.clone());
/// assert!(output.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written lines without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
