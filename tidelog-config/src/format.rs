use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FORMAT: &str = "console";

/// Output encoding selected by the `format` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable lines.
    #[default]
    Console,
    /// One JSON object per line.
    Json,
}

impl Format {
    /// Resolve a format name.
    ///
    /// An empty name means the default (`console`). Any name other than
    /// `console` selects JSON.
    pub fn resolve(name: &str) -> Format {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(DEFAULT_FORMAT) {
            Format::Console
        } else {
            Format::Json
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Console => "console",
            Format::Json => "json",
        }
    }

    /// Whether `name` is one of the documented format names.
    pub fn is_known(name: &str) -> bool {
        let name = name.trim();
        name.is_empty() || name.eq_ignore_ascii_case("console") || name.eq_ignore_ascii_case("json")
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resolution() {
        assert_eq!(Format::resolve(""), Format::Console);
        assert_eq!(Format::resolve("console"), Format::Console);
        assert_eq!(Format::resolve("Console"), Format::Console);
        assert_eq!(Format::resolve("json"), Format::Json);
        assert_eq!(Format::resolve("logfmt"), Format::Json);
    }

    #[test]
    fn test_known_formats() {
        assert!(Format::is_known("json"));
        assert!(Format::is_known(""));
        assert!(!Format::is_known("xml"));
    }
}
