//! Entry encoders
//!
//! An encoder turns an [`Entry`] into bytes. Two encoders ship with the crate:
//! - [`ConsoleEncoder`] - one human-readable line per entry
//! - [`JsonEncoder`] - one JSON object per line
//!
//! Both are driven by an [`EncoderConfig`], which names the keys of the
//! fixed elements, the timestamp layout and the level rendering.

mod console;
mod json;

pub use console::ConsoleEncoder;
pub use json::JsonEncoder;

use std::io;

use crate::entry::Entry;
use crate::level::Level;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_CONSOLE_SEPARATOR: &str = "\t";

/// Encodes entries into a byte buffer.
pub trait Encoder: Send + Sync {
    fn encode(&self, entry: &Entry<'_>, buf: &mut Vec<u8>) -> io::Result<()>;
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(&self, entry: &Entry<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        (**self).encode(entry, buf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelEncoding {
    /// `INFO`
    #[default]
    Capital,
    /// `INFO` wrapped in an ANSI color escape
    CapitalColor,
    /// `info`
    Lowercase,
}

impl LevelEncoding {
    pub fn render(&self, level: Level) -> String {
        match self {
            LevelEncoding::Capital => level.as_str().to_string(),
            LevelEncoding::Lowercase => level.as_lowercase_str().to_string(),
            LevelEncoding::CapitalColor => format!(
                "\x1b[{}m{}\x1b[0m",
                level.color().to_fg_str(),
                level.as_str()
            ),
        }
    }
}

/// Key names and rendering options shared by the encoders.
///
/// An empty key omits that element from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub time_format: String,
    pub level_encoding: LevelEncoding,
    /// Separator between console elements; empty means `"\t"`.
    pub console_separator: String,
    pub line_ending: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "timestamp".to_string(),
            level_key: "level".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            level_encoding: LevelEncoding::Capital,
            console_separator: String::new(),
            line_ending: "\n".to_string(),
        }
    }
}

impl EncoderConfig {
    pub(crate) fn format_time(&self, entry: &Entry<'_>) -> String {
        entry.time.format(&self.time_format).to_string()
    }

    pub(crate) fn separator(&self) -> &str {
        if self.console_separator.is_empty() {
            DEFAULT_CONSOLE_SEPARATOR
        } else {
            &self.console_separator
        }
    }

    pub(crate) fn line_ending(&self) -> &str {
        if self.line_ending.is_empty() {
            "\n"
        } else {
            &self.line_ending
        }
    }
}
