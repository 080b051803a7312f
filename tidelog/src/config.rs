//! Logger configuration with construction hooks
//!
//! [`Config`] is a [`BasicConfig`] plus three optional hooks that replace
//! parts of the default pipeline:
//!
//! - `apply_fields`: turns a [`Context`] into fields for [`Logger::with_context`]
//! - `apply_encoder`: builds the encoder from the resolved format and [`EncoderConfig`]
//! - `apply_core`: builds the core from the encoder and the resolved threshold
//!
//! Hooks are evaluated once, while the logger is built.
//!
//! [`Logger::with_context`]: crate::Logger::with_context

use std::fmt;
use std::sync::Arc;

use tidelog_config::{BasicConfig, Format};
use tidelog_core::encoder::{ConsoleEncoder, Encoder, EncoderConfig, JsonEncoder, LevelEncoding};
use tidelog_core::error::Result;
use tidelog_core::{Core, Field, IoCore, Level};

use crate::context::Context;
use crate::options::LoggerOption;

pub type FieldsHook = Arc<dyn Fn(&Context) -> Vec<Field> + Send + Sync>;

pub type EncoderHook =
    Arc<dyn Fn(Format, EncoderConfig, &BasicConfig) -> Result<Box<dyn Encoder>> + Send + Sync>;

pub type CoreHook =
    Arc<dyn Fn(Box<dyn Encoder>, Level, &BasicConfig) -> Result<Box<dyn Core>> + Send + Sync>;

#[derive(Clone, Default)]
pub struct Config {
    pub basic: BasicConfig,

    /// Extra logger options. Caller capture (and stack traces when
    /// `print_stacktrace` is set) are appended during the build.
    pub options: Vec<LoggerOption>,

    /// Fields for context-derived loggers. Defaults to a hook returning none.
    pub apply_fields: Option<FieldsHook>,

    /// Encoder construction. Defaults to [`default_encoder`].
    pub apply_encoder: Option<EncoderHook>,

    /// Core construction. Defaults to [`default_core`].
    pub apply_core: Option<CoreHook>,
}

impl Config {
    pub fn new(basic: BasicConfig) -> Self {
        Self {
            basic,
            ..Self::default()
        }
    }

    pub fn with_option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_fields_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Context) -> Vec<Field> + Send + Sync + 'static,
    {
        self.apply_fields = Some(Arc::new(hook));
        self
    }

    pub fn with_encoder_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Format, EncoderConfig, &BasicConfig) -> Result<Box<dyn Encoder>>
            + Send
            + Sync
            + 'static,
    {
        self.apply_encoder = Some(Arc::new(hook));
        self
    }

    pub fn with_core_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Box<dyn Encoder>, Level, &BasicConfig) -> Result<Box<dyn Core>>
            + Send
            + Sync
            + 'static,
    {
        self.apply_core = Some(Arc::new(hook));
        self
    }

    /// Fill every unset value with its default and return the hooks to run.
    pub(crate) fn apply_defaults(&mut self) -> (EncoderHook, CoreHook) {
        self.basic.apply_defaults();
        self.apply_fields
            .get_or_insert_with(|| Arc::new(noop_fields) as FieldsHook);
        let encoder = self
            .apply_encoder
            .get_or_insert_with(|| Arc::new(default_encoder) as EncoderHook)
            .clone();
        let core = self
            .apply_core
            .get_or_insert_with(|| Arc::new(default_core) as CoreHook)
            .clone();
        (encoder, core)
    }
}

impl From<BasicConfig> for Config {
    fn from(basic: BasicConfig) -> Self {
        Config::new(basic)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("basic", &self.basic)
            .field("options", &self.options)
            .field("apply_fields", &self.apply_fields.is_some())
            .field("apply_encoder", &self.apply_encoder.is_some())
            .field("apply_core", &self.apply_core.is_some())
            .finish()
    }
}

// --- Default hooks ---

/// Encoder settings derived from the basic config: fixed key names, the
/// `YYYY-MM-DD HH:MM:SS` timestamp, the configured console separator and
/// colored levels for colored console output.
pub fn encoder_config(basic: &BasicConfig) -> EncoderConfig {
    let mut ec = EncoderConfig {
        console_separator: basic.console_separator.clone(),
        ..EncoderConfig::default()
    };
    if basic.use_color() {
        ec.level_encoding = LevelEncoding::CapitalColor;
    }
    ec
}

pub fn noop_fields(_ctx: &Context) -> Vec<Field> {
    Vec::new()
}

/// Console encoder for [`Format::Console`], JSON encoder otherwise.
pub fn default_encoder(
    format: Format,
    ec: EncoderConfig,
    _basic: &BasicConfig,
) -> Result<Box<dyn Encoder>> {
    match format {
        Format::Console => Ok(Box::new(ConsoleEncoder::new(ec))),
        Format::Json => Ok(Box::new(JsonEncoder::new(ec))),
    }
}

/// A single core writing to stdout, filtered by `level`.
pub fn default_core(
    encoder: Box<dyn Encoder>,
    level: Level,
    _basic: &BasicConfig,
) -> Result<Box<dyn Core>> {
    Ok(Box::new(IoCore::new(encoder, std::io::stdout, level)))
}
