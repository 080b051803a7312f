//! The logger handle
//!
//! A [`Logger`] owns a core plus the policy around it: accumulated fields,
//! caller capture, stack traces, entry hooks and what `fatal` does. It is
//! cheap to clone; derived loggers share the core.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tidelog_core::entry::capture_stacktrace;
use tidelog_core::error::Result;
use tidelog_core::{Caller, Core, Entry, Field, Level, LevelOverride, NopCore};

use crate::config::{encoder_config, Config};
use crate::context::Context;
use crate::options::{EntryHook, FatalHook, LoggerOption};

#[derive(Clone)]
pub struct Logger {
    core: Arc<dyn Core>,
    fields: Vec<Field>,
    add_caller: bool,
    stacktrace_level: Option<Level>,
    hooks: Vec<EntryHook>,
    on_fatal: FatalHook,
    config: Arc<Config>,
}

impl Logger {
    /// Build a logger from `config` without installing it anywhere.
    ///
    /// Empty level and format fall back to `debug` and `console`, unset hooks
    /// to the defaults. The level is parsed before any hook runs, and hook
    /// errors are returned as they are.
    pub fn new(config: Config) -> Result<Self> {
        let mut config = config;
        let (encoder_hook, core_hook) = config.apply_defaults();

        let level = config.basic.level()?;
        let format = config.basic.format();

        let encoder = encoder_hook(format, encoder_config(&config.basic), &config.basic)?;
        let core = core_hook(encoder, level, &config.basic)?;

        let mut options = vec![LoggerOption::AddCaller];
        if config.basic.print_stacktrace {
            options.push(LoggerOption::AddStacktrace(Level::Error));
        }
        options.extend(config.options.iter().cloned());

        let logger = Logger {
            core: Arc::from(core),
            fields: Vec::new(),
            add_caller: false,
            stacktrace_level: None,
            hooks: Vec::new(),
            on_fatal: FatalHook::default(),
            config: Arc::new(config),
        };
        Ok(logger.with_options(options))
    }

    /// Wrap an existing core with default policy and no hooks.
    pub fn from_core<C: Core + 'static>(core: C) -> Self {
        Logger {
            core: Arc::new(core),
            fields: Vec::new(),
            add_caller: true,
            stacktrace_level: None,
            hooks: Vec::new(),
            on_fatal: FatalHook::default(),
            config: Arc::new(Config::default()),
        }
    }

    /// A logger that writes nothing. `panic` and `fatal` still terminate.
    pub fn nop() -> Self {
        Logger::from_core(NopCore)
    }

    /// The configuration this logger was built from, defaults filled in.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn with_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        for option in options {
            match option {
                LoggerOption::AddCaller => self.add_caller = true,
                LoggerOption::WithCaller(enabled) => self.add_caller = enabled,
                LoggerOption::AddStacktrace(level) => self.stacktrace_level = Some(level),
                LoggerOption::Fields(fields) => self.fields.extend(fields),
                LoggerOption::IncreaseLevel(level) => {
                    self.core = Arc::new(LevelOverride::new(self.core.clone(), level));
                }
                LoggerOption::Hook(hook) => self.hooks.push(hook),
                LoggerOption::OnFatal(hook) => self.on_fatal = hook,
            }
        }
        self
    }

    /// A child logger carrying `fields` on every entry.
    pub fn with<I>(&self, fields: I) -> Logger
    where
        I: IntoIterator<Item = Field>,
    {
        let mut child = self.clone();
        child.fields.extend(fields);
        child
    }

    /// A child logger carrying the fields the configured fields hook
    /// extracts from `ctx`. Returns a plain clone when there are none.
    pub fn with_context(&self, ctx: &Context) -> Logger {
        let fields = match &self.config.apply_fields {
            Some(hook) => hook(ctx),
            None => return self.clone(),
        };
        if fields.is_empty() {
            return self.clone();
        }
        self.with(fields)
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.core.enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.log_with_caller(level, msg, fields, Some(Caller::here()));
    }

    #[track_caller]
    pub fn trace(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Trace, msg, fields);
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Log at `Panic`, flush, then panic with `msg`.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.emit(Level::Panic, msg, fields, Some(Caller::here()));
        self.terminate(Level::Panic, msg)
    }

    /// Log at `Fatal`, flush, then exit with status 1 (or panic, see
    /// [`FatalHook`]).
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.emit(Level::Fatal, msg, fields, Some(Caller::here()));
        self.terminate(Level::Fatal, msg)
    }

    /// Log with an explicit call site. Bridges use this to report the
    /// location of the statement they forward.
    pub fn log_with_caller(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        caller: Option<Caller>,
    ) {
        self.emit(level, msg, fields, caller);
        if level >= Level::Panic {
            self.terminate(level, msg);
        }
    }

    /// Flush the core.
    pub fn sync(&self) -> Result<()> {
        Ok(self.core.sync()?)
    }

    fn write_entry(&self, level: Level, msg: &str, fields: &[Field], caller: Option<Caller>) {
        let merged: Cow<'_, [Field]> = if self.fields.is_empty() {
            Cow::Borrowed(fields)
        } else if fields.is_empty() {
            Cow::Borrowed(self.fields.as_slice())
        } else {
            let mut all = self.fields.clone();
            all.extend_from_slice(fields);
            Cow::Owned(all)
        };

        let mut entry = Entry::new(level, msg, &merged);
        if self.add_caller {
            entry.caller = caller;
        }
        if self.stacktrace_level.is_some_and(|threshold| level >= threshold) {
            entry = entry.with_stacktrace(capture_stacktrace());
        }

        if let Err(e) = self.core.write(&entry) {
            eprintln!("tidelog: failed to write {} entry: {}", level, e);
        }
        for hook in &self.hooks {
            hook(&entry);
        }
    }

    fn emit(&self, level: Level, msg: &str, fields: &[Field], caller: Option<Caller>) {
        if self.core.enabled(level) {
            self.write_entry(level, msg, fields, caller);
        }
    }

    /// Flush, then end the thread (`Panic`) or the process (`Fatal`).
    fn terminate(&self, level: Level, msg: &str) -> ! {
        if let Err(e) = self.core.sync() {
            eprintln!("tidelog: failed to flush: {}", e);
        }
        match (level, self.on_fatal) {
            (Level::Fatal, FatalHook::Exit) => std::process::exit(1),
            _ => panic!("{}", msg),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("fields", &self.fields)
            .field("add_caller", &self.add_caller)
            .field("stacktrace_level", &self.stacktrace_level)
            .field("hooks", &self.hooks.len())
            .field("on_fatal", &self.on_fatal)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tidelog_config::BasicConfig;
    use tidelog_core::{fields, IoCore, LogError, MemorySink};

    fn memory_logger(basic: BasicConfig) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let writer = sink.clone();
        let config = Config::new(basic).with_core_hook(move |encoder, level, _| {
            Ok(Box::new(IoCore::new(encoder, writer.clone(), level)) as Box<dyn Core>)
        });
        (Logger::new(config).unwrap(), sink)
    }

    fn json_basic(level: &str) -> BasicConfig {
        BasicConfig {
            level: level.to_string(),
            format: "json".to_string(),
            ..BasicConfig::default()
        }
    }

    #[test]
    fn test_threshold_filters_lower_levels() {
        let (logger, sink) = memory_logger(json_basic("warn"));
        logger.debug("hidden", &[]);
        logger.info("hidden", &[]);
        logger.warn("shown", &[]);
        logger.error("shown", &[]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.contains("\"msg\":\"shown\"")));
        assert!(!logger.enabled(Level::Info));
        assert!(logger.enabled(Level::Warn));
    }

    #[test]
    fn test_caller_points_at_call_site() {
        let (logger, sink) = memory_logger(json_basic("debug"));
        logger.info("here", &[]);

        let record: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
        let caller = record["caller"].as_str().unwrap();
        assert!(caller.starts_with("src/logger.rs:"), "caller was {}", caller);
    }

    #[test]
    fn test_with_caller_false_drops_caller() {
        let basic = json_basic("debug");
        let sink = MemorySink::new();
        let writer = sink.clone();
        let config = Config::new(basic)
            .with_option(LoggerOption::WithCaller(false))
            .with_core_hook(move |encoder, level, _| {
                Ok(Box::new(IoCore::new(encoder, writer.clone(), level)) as Box<dyn Core>)
            });
        let logger = Logger::new(config).unwrap();
        logger.info("no caller", &[]);

        let record: serde_json::Value = serde_json::from_str(&sink.lines()[0]).unwrap();
        assert!(record.get("caller").is_none());
    }

    #[test]
    fn test_child_fields_merge_in_order() {
        let (logger, sink) = memory_logger(json_basic("debug"));
        let child = logger.with(fields! { "service" => "api" });
        child.info("request", &fields! { "status" => 200 });
        logger.info("base", &[]);

        let lines = sink.lines();
        let child_line = &lines[0];
        let service = child_line.find("\"service\"").unwrap();
        let status = child_line.find("\"status\"").unwrap();
        assert!(service < status);
        assert!(!lines[1].contains("service"));
    }

    #[test]
    fn test_with_context_uses_fields_hook() {
        let sink = MemorySink::new();
        let writer = sink.clone();
        let config = Config::new(json_basic("debug"))
            .with_fields_hook(|ctx| ctx.to_fields())
            .with_core_hook(move |encoder, level, _| {
                Ok(Box::new(IoCore::new(encoder, writer.clone(), level)) as Box<dyn Core>)
            });
        let logger = Logger::new(config).unwrap();

        let ctx = Context::new().with("request_id", "r-1");
        logger.with_context(&ctx).info("derived", &[]);
        logger.info("base", &[]);

        let lines = sink.lines();
        assert!(lines[0].contains("\"request_id\":\"r-1\""));
        assert!(!lines[1].contains("request_id"));
    }

    #[test]
    fn test_with_context_without_hook_is_base() {
        let (logger, sink) = memory_logger(json_basic("debug"));
        let ctx = Context::new().with("request_id", "r-1");
        logger.with_context(&ctx).info("derived", &[]);
        assert!(!sink.contents().contains("request_id"));
    }

    #[test]
    fn test_stacktrace_only_at_error_and_above() {
        let mut basic = json_basic("debug");
        basic.print_stacktrace = true;
        let (logger, sink) = memory_logger(basic);

        logger.warn("warned", &[]);
        logger.error("failed", &[]);

        let lines = sink.lines();
        let warn: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        let error: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert!(warn.get("stacktrace").is_none());
        assert!(!error["stacktrace"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_increase_level_only_raises() {
        let (logger, sink) = memory_logger(json_basic("info"));
        let quiet = logger.clone().with_options([LoggerOption::IncreaseLevel(Level::Error)]);
        quiet.warn("dropped", &[]);
        quiet.error("kept", &[]);

        let louder = logger.with_options([LoggerOption::IncreaseLevel(Level::Debug)]);
        louder.debug("still dropped", &[]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));
    }

    #[test]
    fn test_hooks_see_written_entries() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let (logger, _sink) = memory_logger(json_basic("info"));
        let logger = logger.with_options([LoggerOption::hook(move |entry| {
            assert_eq!(entry.message, "counted");
            counter.fetch_add(1, Ordering::SeqCst);
        })]);

        logger.debug("filtered", &[]);
        logger.info("counted", &[]);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_level_fails_before_hooks() {
        let called = Arc::new(AtomicUsize::new(0));
        let counter = called.clone();
        let config = Config::new(BasicConfig {
            level: "fetal".to_string(),
            ..BasicConfig::default()
        })
        .with_encoder_hook(move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(LogError::Encoder("unreachable".to_string()))
        });

        let err = Logger::new(config).unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel(ref name) if name == "fetal"));
        assert_eq!(called.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_config_is_resolved() {
        let (logger, _sink) = memory_logger(BasicConfig {
            level: String::new(),
            format: String::new(),
            ..BasicConfig::default()
        });
        assert_eq!(logger.config().basic.level, "debug");
        assert_eq!(logger.config().basic.format, "console");
        assert!(logger.config().apply_fields.is_some());
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_panic_level_panics() {
        let (logger, _sink) = memory_logger(json_basic("debug"));
        logger.panic("boom", &[]);
    }

    #[test]
    #[should_panic(expected = "filtered boom")]
    fn test_panic_level_panics_when_filtered() {
        let logger = Logger::nop();
        logger.panic("filtered boom", &[]);
    }

    #[test]
    fn test_fatal_with_panic_hook_writes_first() {
        let (logger, sink) = memory_logger(json_basic("debug"));
        let logger = logger.with_options([LoggerOption::OnFatal(FatalHook::Panic)]);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.fatal("shutting down", &[]);
        }));
        assert!(result.is_err());
        assert!(sink.contents().contains("\"level\":\"FATAL\""));
    }

    fn port_or_fatal(logger: &Logger, raw: &str) -> u16 {
        match raw.parse() {
            Ok(port) => port,
            Err(_) => logger.fatal("invalid port", &[tidelog_core::field::string("raw", raw)]),
        }
    }

    #[test]
    fn test_fatal_diverges_in_value_position() {
        let (logger, sink) = memory_logger(json_basic("debug"));
        let logger = logger.with_options([LoggerOption::OnFatal(FatalHook::Panic)]);
        assert_eq!(port_or_fatal(&logger, "8080"), 8080);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            port_or_fatal(&logger, "eighty")
        }));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("invalid port"));
        assert!(sink.contents().contains("\"raw\":\"eighty\""));
    }

    #[test]
    fn test_log_with_caller_at_panic_terminates() {
        let logger = Logger::nop();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.log_with_caller(Level::Panic, "bridged panic", &[], None);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_nop_writes_nothing() {
        let logger = Logger::nop();
        assert!(!logger.enabled(Level::Error));
        logger.error("ignored", &[]);
        assert!(logger.sync().is_ok());
    }
}
