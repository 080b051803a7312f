pub use anyhow::bail;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    MissingConfig,
    InvalidLevel(String),
    Encoder(String),
    Core(String),
    Config(String),
    Io(#[from] std::io::Error),
    Serialization(String),
    Other(#[from] anyhow::Error),
}

impl Display for LogError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LogError::MissingConfig => {
                write!(f, "the logger configuration is missing, please check it")
            }
            LogError::InvalidLevel(s) => {
                write!(f, "unrecognized level: {:?}\n\n", s)?;
                write!(f, "Supported levels:\n")?;
                write!(f, "  • trace, debug, info, warn, error, panic, fatal")
            }
            LogError::Encoder(s) => write!(f, "Encoder error: {}", s),
            LogError::Core(s) => write!(f, "Core error: {}", s),
            LogError::Config(s) => write!(f, "Configuration error: {}", s),
            LogError::Io(e) => write!(f, "I/O error: {}", e),
            LogError::Serialization(s) => write!(f, "Serialization error: {}", s),
            LogError::Other(e) => write!(f, "Other error: {}", e),
        }
    }
}

impl From<serde_yaml_ng::Error> for LogError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        LogError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Serialization(err.to_string())
    }
}

impl From<tracing_appender::rolling::InitError> for LogError {
    fn from(err: tracing_appender::rolling::InitError) -> Self {
        LogError::Core(format!("failed to open file sink: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
