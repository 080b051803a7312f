use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Local};

use crate::field::Field;
use crate::level::Level;

/// Source location of a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }

    /// `dir/file.rs:line`, keeping only the last directory of the path.
    pub fn short(&self) -> String {
        let path = self.file.replace('\\', "/");
        let trimmed = match path.rmatch_indices('/').nth(1) {
            Some((idx, _)) => &path[idx + 1..],
            None => path.as_str(),
        };
        format!("{}:{}", trimmed, self.line)
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single log event as handed to cores and encoders.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    pub level: Level,
    pub time: DateTime<Local>,
    pub message: &'a str,
    pub caller: Option<Caller>,
    pub stacktrace: Option<String>,
    pub fields: &'a [Field],
}

impl<'a> Entry<'a> {
    pub fn new(level: Level, message: &'a str, fields: &'a [Field]) -> Self {
        Self {
            level,
            time: Local::now(),
            message,
            caller: None,
            stacktrace: None,
            fields,
        }
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: String) -> Self {
        self.stacktrace = Some(stacktrace);
        self
    }

    /// Look up the value of the last field with the given key.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.key() == key)
            .map(Field::value)
    }
}

/// Capture the current thread's stack as text.
pub fn capture_stacktrace() -> String {
    std::backtrace::Backtrace::force_capture().to_string()
}
