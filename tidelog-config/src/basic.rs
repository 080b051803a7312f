//! Plain logger settings
//!
//! [`BasicConfig`] is the serializable part of the logger configuration, the
//! piece that usually lives in an application's config file under a `log`
//! or `logger` section. Values are validated when a logger is built, not
//! when the struct is constructed or deserialized.

use serde::{Deserialize, Serialize};
use tidelog_core::error::{LogError, Result};
use tidelog_core::Level;

use crate::format::{Format, DEFAULT_FORMAT};

pub const DEFAULT_LEVEL: &str = "debug";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    /// Minimum level written. One of trace, debug, info, warn, error, panic, fatal.
    pub level: String,

    /// Color the level label. Only honored by the console format.
    pub level_color: bool,

    /// `console` or `json`.
    pub format: String,

    /// Separator between console elements. Empty means a tab.
    pub console_separator: String,

    /// Attach stack traces to error-and-above entries.
    pub print_stacktrace: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            level_color: true,
            format: DEFAULT_FORMAT.to_string(),
            console_separator: String::new(),
            print_stacktrace: false,
        }
    }
}

impl BasicConfig {
    /// Fill empty level and format with their defaults.
    pub fn apply_defaults(&mut self) {
        if self.level.trim().is_empty() {
            self.level = DEFAULT_LEVEL.to_string();
        }
        if self.format.trim().is_empty() {
            self.format = DEFAULT_FORMAT.to_string();
        }
    }

    /// Resolved severity threshold. An empty level resolves to `debug`.
    pub fn level(&self) -> Result<Level> {
        if self.level.trim().is_empty() {
            return Ok(Level::Debug);
        }
        Level::parse(&self.level)
    }

    pub fn format(&self) -> Format {
        Format::resolve(&self.format)
    }

    /// Whether level labels should carry ANSI colors.
    pub fn use_color(&self) -> bool {
        self.level_color && self.format() == Format::Console
    }

    /// Strict check of the level and format names.
    ///
    /// Building a logger only requires the level to parse; unknown formats
    /// fall back to JSON there. This is for callers that want to reject
    /// typos at startup.
    pub fn validate(&self) -> Result<()> {
        self.level()?;
        if !Format::is_known(&self.format) {
            return Err(LogError::Config(format!(
                "unsupported format {:?} (supported: console, json)",
                self.format
            )));
        }
        Ok(())
    }
}
