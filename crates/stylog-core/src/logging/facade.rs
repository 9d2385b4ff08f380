//! Bridge from the `log` crate facade
//!
//! Once installed, `log::info!` and friends from any crate are routed to the
//! registry logger named after the record's target, with `::` turned into
//! `.` so module paths line up with the logger hierarchy. Targets with no
//! registered logger go to their nearest registered ancestor, or the root;
//! the bridge never registers loggers itself.

use std::sync::Arc;

use super::level::Level;
use super::record::{Location, Record};
use super::registry::{self, Registry};
use crate::error::LogResult;

/// `log::Log` implementation over a [`Registry`]
#[derive(Debug)]
pub struct LogFacade {
    registry: Arc<Registry>,
}

impl LogFacade {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    fn logger_name(target: &str) -> String {
        target.replace("::", ".")
    }
}

impl log::Log for LogFacade {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.registry
            .lookup(&Self::logger_name(metadata.target()))
            .is_enabled_for(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let name = Self::logger_name(record.target());
        let logger = self.registry.lookup(&name);
        let level = Level::from(record.level());
        if !logger.is_enabled_for(level) {
            return;
        }

        let location = Location::new(
            record.file_static().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            None,
        );
        logger.handle(&Record::new(
            level,
            name,
            record.args().to_string(),
            location,
        ));
    }

    fn flush(&self) {}
}

/// Install the bridge over the global registry as the `log` logger
///
/// Fails if another `log` logger is already installed.
pub fn init_log_facade(max_level: log::LevelFilter) -> LogResult<()> {
    log::set_boxed_logger(Box::new(LogFacade::new(registry::global())))?;
    log::set_max_level(max_level);
    Ok(())
}
