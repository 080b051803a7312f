use std::fmt;
use std::sync::Arc;

use tidelog::Logger;

use crate::LoggerRef;

/// Logger interface for frameworks that pass a format string and arguments.
///
/// Arguments come in as [`fmt::Arguments`], so format strings are checked at
/// compile time:
///
/// ```rust
/// use tidelog_adapters::{FormatAdapter, FormatLog};
///
/// let log = FormatAdapter::new();
/// log.info(format_args!("served {} requests in {:.1}s", 120, 3.25));
/// ```
pub trait FormatLog {
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn debug(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);

    /// Log at `Fatal`, then terminate the process.
    fn fatal(&self, args: fmt::Arguments<'_>) -> !;
}

/// Renders the arguments and forwards the text as the message.
#[derive(Debug, Clone, Default)]
pub struct FormatAdapter {
    logger: LoggerRef,
}

impl FormatAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Arc<Logger>) -> Self {
        Self {
            logger: LoggerRef::Fixed(logger),
        }
    }
}

// A literal-only format string needs no allocation.
fn render(args: fmt::Arguments<'_>) -> std::borrow::Cow<'static, str> {
    match args.as_str() {
        Some(text) => text.into(),
        None => args.to_string().into(),
    }
}

impl FormatLog for FormatAdapter {
    #[track_caller]
    fn info(&self, args: fmt::Arguments<'_>) {
        self.logger.get().info(&render(args), &[]);
    }

    #[track_caller]
    fn warn(&self, args: fmt::Arguments<'_>) {
        self.logger.get().warn(&render(args), &[]);
    }

    #[track_caller]
    fn debug(&self, args: fmt::Arguments<'_>) {
        self.logger.get().debug(&render(args), &[]);
    }

    #[track_caller]
    fn error(&self, args: fmt::Arguments<'_>) {
        self.logger.get().error(&render(args), &[]);
    }

    #[track_caller]
    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.logger.get().fatal(&render(args), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_logger;
    use serde_json::Value;
    use tidelog::{FatalHook, LoggerOption};

    fn messages(sink: &tidelog::MemorySink) -> Vec<String> {
        sink.lines()
            .iter()
            .map(|line| {
                let record: Value = serde_json::from_str(line).unwrap();
                record["msg"].as_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_output_matches_direct_formatting() {
        let (logger, sink) = memory_logger();
        let adapter = FormatAdapter::with_logger(Arc::new(logger));

        let user = "alice";
        let attempts = 3;
        let ratio = 0.4567;
        adapter.info(format_args!("user {} logged in after {} attempts", user, attempts));
        adapter.warn(format_args!("hit ratio {:.2} below {:>5}", ratio, "0.5"));
        adapter.debug(format_args!("{:?}", vec![1, 2, 3]));
        adapter.error(format_args!("plain text, 100% literal"));

        assert_eq!(
            messages(&sink),
            vec![
                format!("user {} logged in after {} attempts", user, attempts),
                format!("hit ratio {:.2} below {:>5}", ratio, "0.5"),
                format!("{:?}", vec![1, 2, 3]),
                "plain text, 100% literal".to_string(),
            ]
        );
    }

    #[test]
    fn test_fatal_writes_then_terminates() {
        let (logger, sink) = memory_logger();
        let logger = logger.with_options([LoggerOption::OnFatal(FatalHook::Panic)]);
        let adapter = FormatAdapter::with_logger(Arc::new(logger));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            adapter.fatal(format_args!("cannot bind :{}", 8080));
        }));
        assert!(result.is_err());
        assert_eq!(messages(&sink), vec!["cannot bind :8080".to_string()]);
    }
}
