//! Process-wide default logger
//!
//! [`init`] builds a logger from a [`Config`] and installs it as the default.
//! The free functions in this module forward to whatever logger is installed
//! when they are called. Before the first successful `init` (or
//! [`set_default`]) they go to a no-op logger.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tidelog::{field, BasicConfig, Config};
//!
//! tidelog::init(Config::new(BasicConfig::default())).unwrap();
//! tidelog::info("server started", &[field::int("port", 8080)]);
//! ```
//!
//! Reinitializing is allowed. The new logger is built completely before it
//! replaces the old one, so a failed `init` leaves the previous default in
//! place, and calls already in flight finish on the logger they started with.

use std::sync::{Arc, OnceLock, RwLock};

use tidelog_core::error::{LogError, Result};
use tidelog_core::Field;

use crate::config::Config;
use crate::context::Context;
use crate::logger::Logger;

static DEFAULT_LOGGER: RwLock<Option<Arc<Logger>>> = RwLock::new(None);
static NOP_LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();

/// Build a logger from `config` and install it as the process default.
///
/// Fails with [`LogError::MissingConfig`] for `None`, with
/// [`LogError::InvalidLevel`] for an unknown level, and with whatever the
/// encoder or core hook returned if one of them fails.
pub fn init(config: impl Into<Option<Config>>) -> Result<()> {
    let config = config.into().ok_or(LogError::MissingConfig)?;
    let logger = Logger::new(config)?;

    let level = logger.config().basic.level.clone();
    let format = logger.config().basic.format.clone();
    set_default(logger);

    tracing::debug!(level = %level, format = %format, "Default logger initialized");
    Ok(())
}

/// Install `logger` as the process default and return the previous one.
pub fn set_default(logger: Logger) -> Option<Arc<Logger>> {
    let mut slot = DEFAULT_LOGGER.write().unwrap_or_else(|poisoned| {
        eprintln!("Warning: default logger lock was poisoned, recovering...");
        poisoned.into_inner()
    });
    slot.replace(Arc::new(logger))
}

/// The current default logger, or a no-op logger before initialization.
pub fn default_logger() -> Arc<Logger> {
    let slot = DEFAULT_LOGGER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    match slot.as_ref() {
        Some(logger) => logger.clone(),
        None => NOP_LOGGER.get_or_init(|| Arc::new(Logger::nop())).clone(),
    }
}

pub fn is_initialized() -> bool {
    DEFAULT_LOGGER
        .read()
        .map(|slot| slot.is_some())
        .unwrap_or_else(|poisoned| poisoned.into_inner().is_some())
}

/// A child of the default logger carrying the fields extracted from `ctx`.
pub fn with_context(ctx: &Context) -> Logger {
    default_logger().with_context(ctx)
}

/// Flush the default logger.
pub fn sync() -> Result<()> {
    default_logger().sync()
}

#[track_caller]
pub fn trace(msg: &str, fields: &[Field]) {
    default_logger().trace(msg, fields);
}

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    default_logger().debug(msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    default_logger().info(msg, fields);
}

#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    default_logger().warn(msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    default_logger().error(msg, fields);
}

/// Log at `Panic` on the default logger, then panic.
#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    default_logger().panic(msg, fields)
}

/// Log at `Fatal` on the default logger, then exit.
#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    default_logger().fatal(msg, fields)
}
