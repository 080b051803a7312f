//! Core logging pipeline for tidelog
//!
//! This crate holds the pieces the configuration layer wires together:
//! levels, fields, entries, encoders, cores and sinks. It has no global
//! state; the `tidelog` crate builds loggers on top of it.

pub mod core;
pub mod encoder;
pub mod entry;
pub mod error;
pub mod field;
pub mod level;
pub mod sink;

pub use crate::core::{Core, IoCore, LevelOverride, NopCore};
pub use encoder::{ConsoleEncoder, Encoder, EncoderConfig, JsonEncoder, LevelEncoding};
pub use entry::{Caller, Entry};
pub use error::{LogError, Result};
pub use field::Field;
pub use level::Level;
pub use sink::{file_sink, MakeTee, MemorySink};

// Sinks are expressed in terms of tracing-subscriber's writer factory.
pub use tracing_subscriber::fmt::MakeWriter;
