//! `tracing` event support
//!
//! [`TracingBridge`] is a [`Layer`] that writes every `tracing` event as a
//! tidelog entry: the `message` field becomes the message, the other event
//! fields become entry fields, and the event's file and line become the
//! caller. Spans are not recorded.

use std::fmt;
use std::sync::Arc;

use tidelog::{field, Caller, Field, Level, LogError, Logger};
use tracing::field::Visit;
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

use crate::LoggerRef;

#[derive(Debug, Clone, Default)]
pub struct TracingBridge {
    logger: LoggerRef,
}

impl TracingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Arc<Logger>) -> Self {
        Self {
            logger: LoggerRef::Fixed(logger),
        }
    }
}

impl<S> Layer<S> for TracingBridge
where
    S: Subscriber,
{
    // The target logger can change after a callsite registers.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        !metadata.is_event() || self.logger.get().enabled(Level::from(*metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());
        let logger = self.logger.get();
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let caller = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Some(Caller::new(file, line)),
            _ => None,
        };
        logger.log_with_caller(level, &visitor.message, &visitor.fields, caller);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn is_message(field: &tracing::field::Field) -> bool {
        field.name() == "message"
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if Self::is_message(field) {
            self.message = value.to_string();
        } else {
            self.fields.push(field::string(field.name(), value));
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields.push(field::int(field.name(), value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.push(field::uint(field.name(), value));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.fields.push(field::float(field.name(), value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.push(field::bool(field.name(), value));
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.fields.push(field::string(field.name(), value.to_string()));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if Self::is_message(field) {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(field::debug(field.name(), value));
        }
    }
}

/// Install a registry with a [`TracingBridge`] to the process default as the
/// global `tracing` subscriber.
pub fn install_tracing_bridge() -> tidelog::Result<()> {
    let subscriber = registry().with(TracingBridge::new());
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LogError::Config(format!("failed to install tracing bridge: {}", e)))
}
