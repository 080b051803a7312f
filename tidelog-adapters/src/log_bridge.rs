//! `log` facade support
//!
//! Libraries that log through the `log` crate end up in the tidelog logger
//! once [`install_log_bridge`] has run. The record's target becomes a
//! `target` field and its file and line become the caller.

use std::borrow::Cow;
use std::sync::Arc;

use log::{LevelFilter, Metadata, Record};
use tidelog::{Caller, Field, Level, Logger};

use crate::LoggerRef;

#[derive(Debug, Clone, Default)]
pub struct LogBridge {
    logger: LoggerRef,
}

impl LogBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Arc<Logger>) -> Self {
        Self {
            logger: LoggerRef::Fixed(logger),
        }
    }
}

pub(crate) fn level_from_log(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger.get().enabled(level_from_log(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let logger = self.logger.get();
        let level = level_from_log(record.level());
        if !logger.enabled(level) {
            return;
        }

        let message: Cow<'_, str> = match record.args().as_str() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(record.args().to_string()),
        };
        let fields = [Field::new("target", record.target())];
        let caller = match (record.file_static(), record.line()) {
            (Some(file), Some(line)) => Some(Caller::new(file, line)),
            _ => None,
        };

        logger.log_with_caller(level, &message, &fields, caller);
    }

    fn flush(&self) {
        if let Err(e) = self.logger.get().sync() {
            eprintln!("tidelog: failed to flush: {}", e);
        }
    }
}

/// Install a [`LogBridge`] to the process default as the `log` logger.
///
/// Filtering is left to the tidelog logger, so the `log` max level is set to
/// `Trace`. Fails if another `log` logger is already installed.
pub fn install_log_bridge() -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new()))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
