use std::sync::Arc;

use tidelog::{Context, Field, Logger};

use crate::LoggerRef;

/// Logger interface for frameworks that pass finished messages.
pub trait MessageLog {
    fn info(&self, msg: &str, fields: &[Field]);
    fn warn(&self, msg: &str, fields: &[Field]);
    fn debug(&self, msg: &str, fields: &[Field]);
    fn error(&self, msg: &str, fields: &[Field]);

    /// Log an error through a logger derived from `ctx`.
    fn error_with_ctx(&self, ctx: &Context, msg: &str, fields: &[Field]);
}

/// Forwards messages and fields verbatim.
#[derive(Debug, Clone, Default)]
pub struct MessageAdapter {
    logger: LoggerRef,
}

impl MessageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Arc<Logger>) -> Self {
        Self {
            logger: LoggerRef::Fixed(logger),
        }
    }
}

impl MessageLog for MessageAdapter {
    #[track_caller]
    fn info(&self, msg: &str, fields: &[Field]) {
        self.logger.get().info(msg, fields);
    }

    #[track_caller]
    fn warn(&self, msg: &str, fields: &[Field]) {
        self.logger.get().warn(msg, fields);
    }

    #[track_caller]
    fn debug(&self, msg: &str, fields: &[Field]) {
        self.logger.get().debug(msg, fields);
    }

    #[track_caller]
    fn error(&self, msg: &str, fields: &[Field]) {
        self.logger.get().error(msg, fields);
    }

    #[track_caller]
    fn error_with_ctx(&self, ctx: &Context, msg: &str, fields: &[Field]) {
        self.logger.get().with_context(ctx).error(msg, fields);
    }
}
