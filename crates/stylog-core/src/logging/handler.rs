//! Sink management for loggers
//!
//! Every logger gets at most one console sink and at most one file sink.
//! These functions are the only places sinks are created on behalf of
//! callers, and both go through the logger's keyed ensure/replace
//! operations.

use std::path::Path;
use std::sync::Arc;

use super::handle::LoggerHandle;
use super::sink::{Sink, SinkKind};
use super::style::{Formatter, Style};
use crate::error::LogResult;

/// Make sure `logger` has exactly one console sink and that it renders with
/// `style`
///
/// An existing console sink keeps its writer and only has its formatter
/// swapped, so calling this any number of times never duplicates output.
/// File sinks and the logger's level are left alone.
pub fn apply_style(logger: &LoggerHandle, style: &Style) -> Arc<Sink> {
    let sink = logger.ensure_sink(SinkKind::Console, Sink::console);
    sink.set_formatter(style.formatter());
    sink
}

/// Switch the console style of a logger at runtime
///
/// Same as [`apply_style`].
pub fn set_logger_style(logger: &LoggerHandle, style: &Style) -> Arc<Sink> {
    apply_style(logger, style)
}

/// Make sure `logger` has exactly one file sink, appending to `path`
///
/// A file sink already writing to `path` is reused; one writing elsewhere is
/// replaced. The file formatter is forced either way.
pub fn attach_file_sink(logger: &LoggerHandle, path: impl AsRef<Path>) -> LogResult<Arc<Sink>> {
    let path = path.as_ref();
    if let Some(existing) = logger.sink(SinkKind::File) {
        if existing.path() == Some(path) {
            existing.set_formatter(Formatter::file());
            return Ok(existing);
        }
    }

    let sink = Sink::file(path)?;
    Ok(logger.replace_sink(sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::level::Level;
    use crate::logging::sink::MemoryWriter;
    use crate::logging::style::{ColorChoice, COLOR_ENV};
    use std::fs;
    use tempfile::tempdir;

    fn logger_with_capture(name: &str) -> (LoggerHandle, MemoryWriter) {
        let logger = LoggerHandle::new(name, Some(Level::Debug), None);
        let output = MemoryWriter::new();
        logger.replace_sink(Sink::console_to(output.clone()));
        (logger, output)
    }

    fn plain() -> Style {
        Style::compact().with_color(ColorChoice::Never)
    }

    #[test]
    fn test_apply_style_creates_console_sink() {
        let logger = LoggerHandle::new("Fresh", Some(Level::Info), None);
        assert!(logger.sink(SinkKind::Console).is_none());

        apply_style(&logger, &Style::Normal);
        assert_eq!(logger.sink_count(SinkKind::Console), 1);
        assert_eq!(
            logger.sink(SinkKind::Console).unwrap().formatter(),
            Formatter::Normal { location: false }
        );
    }

    #[test]
    fn test_apply_style_many_times_keeps_one_sink() {
        let (logger, output) = logger_with_capture("Repeat");
        for i in 0..10 {
            let style = if i % 2 == 0 { Style::Normal } else { plain() };
            apply_style(&logger, &style);
        }
        assert_eq!(logger.sink_count(SinkKind::Console), 1);

        logger.info("once");
        assert_eq!(output.lines().len(), 1);
    }

    #[test]
    fn test_apply_style_keeps_level_and_file_sink() {
        let dir = tempdir().unwrap();
        let (logger, _output) = logger_with_capture("Untouched");
        logger.set_level(Level::Error);
        attach_file_sink(&logger, dir.path().join("u.log")).unwrap();

        set_logger_style(&logger, &Style::Normal);
        assert_eq!(logger.level(), Some(Level::Error));
        assert_eq!(
            logger.sink(SinkKind::File).unwrap().formatter(),
            Formatter::file()
        );
    }

    #[test]
    fn test_style_switch_round_trip() {
        let (switched, switched_out) = logger_with_capture("Round");
        apply_style(&switched, &plain());
        apply_style(&switched, &Style::Normal);
        apply_style(&switched, &plain());

        let (fresh, fresh_out) = logger_with_capture("Round");
        apply_style(&fresh, &plain());

        assert_eq!(
            switched.sink(SinkKind::Console).unwrap().formatter(),
            fresh.sink(SinkKind::Console).unwrap().formatter()
        );

        apply_style(&switched, &Style::Normal);
        let (normal, normal_out) = logger_with_capture("Round");
        apply_style(&normal, &Style::Normal);

        switched.info("same");
        normal.info("same");
        fresh.info("same");
        let strip_time = |line: &str| line.split_once(" - ").map(|(_, rest)| rest.to_string());
        assert_eq!(
            strip_time(&switched_out.contents()),
            strip_time(&normal_out.contents())
        );
        assert!(fresh_out.contents().ends_with(" I Round: same\n"));
    }

    #[test]
    fn test_attach_file_sink_reuses_same_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("svc.log");
        let logger = LoggerHandle::new("Svc", Some(Level::Info), None);

        let first = attach_file_sink(&logger, &path).unwrap();
        let second = attach_file_sink(&logger, &path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(logger.sink_count(SinkKind::File), 1);

        let other = dir.path().join("logs").join("svc2.log");
        attach_file_sink(&logger, &other).unwrap();
        assert_eq!(logger.sink_count(SinkKind::File), 1);
        assert_eq!(
            logger.sink(SinkKind::File).unwrap().path(),
            Some(other.as_path())
        );

        logger.info("to the second file");
        assert!(fs::read_to_string(&path).unwrap().is_empty());
        assert!(fs::read_to_string(&other).unwrap().contains("to the second file"));
    }

    #[test]
    fn test_color_env_toggle_reaches_output() {
        // The only test that touches the variable; every other test pins
        // its color choice.
        let saved = std::env::var(COLOR_ENV).ok();
        let (logger, output) = logger_with_capture("Tinted");

        std::env::set_var(COLOR_ENV, "on");
        apply_style(&logger, &Style::compact());
        logger.warning("colored");

        std::env::set_var(COLOR_ENV, "off");
        apply_style(&logger, &Style::compact());
        logger.warning("plain");

        match saved {
            Some(value) => std::env::set_var(COLOR_ENV, value),
            None => std::env::remove_var(COLOR_ENV),
        }

        let lines = output.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\x1b[33mW\x1b[0m"));
        assert!(lines[0].ends_with(": colored"));
        assert!(!lines[1].contains('\x1b'));
        assert!(lines[1].ends_with(" W Tinted: plain"));
    }
}
