//! Adapters that let other logging interfaces write through tidelog
//!
//! - [`MessageAdapter`] implements [`MessageLog`], for frameworks that hand
//!   over finished messages.
//! - [`FormatAdapter`] implements [`FormatLog`], for frameworks that hand
//!   over a format string and its arguments.
//! - [`LogBridge`] routes the `log` facade (`log::info!` and friends).
//! - [`TracingBridge`] routes `tracing` events.
//!
//! Every adapter writes to the process default logger unless it was built
//! with `with_logger`.

use std::sync::Arc;

use tidelog::Logger;

pub mod format;
pub mod log_bridge;
pub mod message;
pub mod tracing_bridge;

pub use format::{FormatAdapter, FormatLog};
pub use log_bridge::{install_log_bridge, LogBridge};
pub use message::{MessageAdapter, MessageLog};
pub use tracing_bridge::{install_tracing_bridge, TracingBridge};

/// The logger an adapter writes to.
#[derive(Debug, Clone, Default)]
pub(crate) enum LoggerRef {
    /// Whatever [`tidelog::default_logger`] returns at call time.
    #[default]
    Default,
    Fixed(Arc<Logger>),
}

impl LoggerRef {
    pub(crate) fn get(&self) -> Arc<Logger> {
        match self {
            LoggerRef::Default => tidelog::default_logger(),
            LoggerRef::Fixed(logger) => logger.clone(),
        }
    }
}
