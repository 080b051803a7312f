// Standard library imports
use std::env;
use std::fs;
use std::path::Path;

// External crate imports
use tracing::debug;

// Internal imports
use crate::basic::BasicConfig;
use tidelog_core::error::{LogError, Result};

/// Environment prefix used by [`BasicConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "TIDELOG";

impl BasicConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read the logger settings stored under `key` in a larger YAML document.
    ///
    /// A missing key yields the defaults.
    pub fn from_yaml_section(text: &str, key: &str) -> Result<Self> {
        let document: serde_yaml_ng::Value = serde_yaml_ng::from_str(text)?;
        match document.get(key) {
            Some(section) if !section.is_null() => {
                Ok(serde_yaml_ng::from_value(section.clone())?)
            }
            _ => {
                debug!("No '{}' section found, using default logger settings", key);
                Ok(Self::default())
            }
        }
    }

    /// Load settings from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading logger config from: {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| {
            LogError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        match extension(path).as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(LogError::Config(format!(
                "unsupported config file type: {} (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Load the section under `key` from a YAML application config file.
    pub fn load_section(path: impl AsRef<Path>, key: &str) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading '{}' section from: {}", key, path.display());
        let text = fs::read_to_string(path).map_err(|e| {
            LogError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_section(&text, key)
    }

    /// Defaults overridden by `TIDELOG_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(DEFAULT_ENV_PREFIX)?;
        Ok(config)
    }

    /// Override settings from `{PREFIX}_LEVEL`, `{PREFIX}_FORMAT`,
    /// `{PREFIX}_LEVEL_COLOR`, `{PREFIX}_CONSOLE_SEPARATOR` and
    /// `{PREFIX}_PRINT_STACKTRACE`. Unset variables leave values unchanged.
    pub fn apply_env_overrides(&mut self, prefix: &str) -> Result<()> {
        if let Some(level) = env_var(prefix, "LEVEL") {
            self.level = level;
        }
        if let Some(format) = env_var(prefix, "FORMAT") {
            self.format = format;
        }
        if let Some(separator) = env_var(prefix, "CONSOLE_SEPARATOR") {
            self.console_separator = separator;
        }
        if let Some(value) = env_var(prefix, "LEVEL_COLOR") {
            self.level_color = parse_bool(&format!("{}_LEVEL_COLOR", prefix), &value)?;
        }
        if let Some(value) = env_var(prefix, "PRINT_STACKTRACE") {
            self.print_stacktrace = parse_bool(&format!("{}_PRINT_STACKTRACE", prefix), &value)?;
        }
        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn env_var(prefix: &str, name: &str) -> Option<String> {
    env::var(format!("{}_{}", prefix, name)).ok()
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LogError::Config(format!(
            "{} must be a boolean, got {:?}",
            name, other
        ))),
    }
}
