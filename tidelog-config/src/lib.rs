//! Logger settings for tidelog.
//!
//! ## Main Features
//! - [`BasicConfig`]: the serializable settings (level, format, colors, separator, stack traces)
//! - [`Format`]: console/JSON resolution
//! - Loading from YAML/JSON text, files, config sections and environment variables

pub mod basic;
pub mod format;
pub mod loader;

pub use basic::{BasicConfig, DEFAULT_LEVEL};
pub use format::{Format, DEFAULT_FORMAT};
pub use loader::DEFAULT_ENV_PREFIX;
