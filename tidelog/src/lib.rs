//! Configuration-driven structured logging
//!
//! `tidelog` turns a small [`BasicConfig`] (level, format, colors, stack
//! traces) into a [`Logger`] and installs it as the process default:
//!
//! ```rust,no_run
//! use tidelog::{field, BasicConfig, Config};
//!
//! let basic = BasicConfig {
//!     level: "info".to_string(),
//!     format: "json".to_string(),
//!     ..BasicConfig::default()
//! };
//! tidelog::init(Config::new(basic)).unwrap();
//!
//! tidelog::info("listening", &[field::int("port", 8080)]);
//! tidelog::debug("not written", &[]);
//! ```
//!
//! The encoder, the core and the fields attached to context-derived
//! loggers can each be replaced with a hook on [`Config`].

pub mod config;
pub mod context;
pub mod global;
pub mod logger;
pub mod options;

pub use config::{
    default_core, default_encoder, encoder_config, noop_fields, Config, CoreHook, EncoderHook,
    FieldsHook,
};
pub use context::{copy_keys, Context};
pub use global::{
    debug, default_logger, error, fatal, info, init, is_initialized, panic, set_default, sync,
    trace, warn, with_context,
};
pub use logger::Logger;
pub use options::{EntryHook, FatalHook, LoggerOption};

pub use tidelog_config::{BasicConfig, Format};
pub use tidelog_core::{
    field, fields, Caller, Core, Encoder, EncoderConfig, Entry, Field, IoCore, Level,
    LevelEncoding, LogError, MakeWriter, MemorySink, Result,
};
