//! Named logger handles

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::level::Level;
use super::record::{Location, Record};
use super::sink::{Sink, SinkKind};

/// Threshold used when neither a logger nor any ancestor has a level
const FALLBACK_LEVEL: Level = Level::Warning;

struct LoggerInner {
    name: String,
    level: RwLock<Option<Level>>,
    parent: RwLock<Option<LoggerHandle>>,
    sinks: RwLock<Vec<Arc<Sink>>>,
    propagate: AtomicBool,
}

/// Shared handle to a named logger
///
/// Handles are cheap to clone. Two handles are equal only when they refer to
/// the same logger instance, which the [`Registry`](super::Registry)
/// guarantees for equal names.
#[derive(Clone)]
pub struct LoggerHandle {
    inner: Arc<LoggerInner>,
}

impl PartialEq for LoggerHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for LoggerHandle {}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.inner.name)
            .field("level", &self.level())
            .field("parent", &self.parent().map(|p| p.name().to_string()))
            .field("sinks", &self.inner.sinks.read().len())
            .field("propagate", &self.propagate())
            .finish()
    }
}

impl LoggerHandle {
    pub(crate) fn new(name: impl Into<String>, level: Option<Level>, parent: Option<LoggerHandle>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                name: name.into(),
                level: RwLock::new(level),
                parent: RwLock::new(parent),
                sinks: RwLock::new(Vec::new()),
                propagate: AtomicBool::new(true),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Level set on this logger itself, if any
    pub fn level(&self) -> Option<Level> {
        *self.inner.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.inner.level.write() = Some(level);
    }

    /// Drop this logger's own level so it inherits from its ancestors again
    pub fn clear_level(&self) {
        *self.inner.level.write() = None;
    }

    /// Own level, or the nearest ancestor's
    pub fn effective_level(&self) -> Level {
        let mut current = Some(self.clone());
        while let Some(logger) = current {
            if let Some(level) = logger.level() {
                return level;
            }
            current = logger.parent();
        }
        FALLBACK_LEVEL
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.effective_level()
    }

    pub fn parent(&self) -> Option<LoggerHandle> {
        self.inner.parent.read().clone()
    }

    pub(crate) fn set_parent(&self, parent: Option<LoggerHandle>) {
        *self.inner.parent.write() = parent;
    }

    /// Whether records continue on to the ancestors' sinks
    pub fn propagate(&self) -> bool {
        self.inner.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.inner.propagate.store(propagate, Ordering::Relaxed);
    }

    /// Snapshot of the sinks attached directly to this logger
    pub fn sinks(&self) -> Vec<Arc<Sink>> {
        self.inner.sinks.read().clone()
    }

    pub fn sink(&self, kind: SinkKind) -> Option<Arc<Sink>> {
        self.inner
            .sinks
            .read()
            .iter()
            .find(|s| s.kind() == kind)
            .cloned()
    }

    pub fn sink_count(&self, kind: SinkKind) -> usize {
        self.inner
            .sinks
            .read()
            .iter()
            .filter(|s| s.kind() == kind)
            .count()
    }

    /// Return the sink of `kind`, creating and attaching it if missing
    ///
    /// The lookup and the insert happen under one write lock, so concurrent
    /// callers never attach two sinks of the same kind.
    pub fn ensure_sink<F>(&self, kind: SinkKind, create: F) -> Arc<Sink>
    where
        F: FnOnce() -> Sink,
    {
        let mut sinks = self.inner.sinks.write();
        if let Some(existing) = sinks.iter().find(|s| s.kind() == kind) {
            return Arc::clone(existing);
        }

        let sink = Arc::new(create());
        debug_assert_eq!(sink.kind(), kind);
        sinks.push(Arc::clone(&sink));
        sink
    }

    /// Attach `sink`, replacing any sink of the same kind
    pub fn replace_sink(&self, sink: Sink) -> Arc<Sink> {
        let sink = Arc::new(sink);
        let mut sinks = self.inner.sinks.write();
        sinks.retain(|s| s.kind() != sink.kind());
        sinks.push(Arc::clone(&sink));
        sink
    }

    /// Detach every sink of `kind`, returning how many were removed
    pub fn remove_sinks(&self, kind: SinkKind) -> usize {
        let mut sinks = self.inner.sinks.write();
        let before = sinks.len();
        sinks.retain(|s| s.kind() != kind);
        before - sinks.len()
    }

    pub fn clear_sinks(&self) {
        self.inner.sinks.write().clear();
    }

    /// Log `message` at `level`, recording the caller's file and line
    #[track_caller]
    pub fn log(&self, level: Level, message: &str) {
        self.log_at(level, message, Location::caller());
    }

    /// Log with an explicit call-site, as the logging macros do
    pub fn log_at(&self, level: Level, message: &str, location: Location) {
        if !self.is_enabled_for(level) {
            return;
        }
        self.handle(&Record::new(level, self.name(), message, location));
    }

    /// Pass a record to this logger's sinks and then up the hierarchy
    ///
    /// No level check happens here; sinks still apply their own thresholds.
    pub fn handle(&self, record: &Record) {
        let mut current = Some(self.clone());
        while let Some(logger) = current {
            for sink in logger.sinks() {
                sink.emit(record);
            }
            if !logger.propagate() {
                break;
            }
            current = logger.parent();
        }
    }

    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }
}
