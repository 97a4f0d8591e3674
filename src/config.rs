//! Configuration for the analyzer.
//!
//! [`analyze`](crate::analyze) always runs with [`Config::default()`]. Build a
//! different configuration with [`ConfigBuilder`] and pass it to an
//! [`Analyzer`](crate::Analyzer) or a batch run.

use std::fmt;
use std::str::FromStr;

use crate::error::AnalyzeError;

/// How the nested-property path evolves across diagnostic lines.
///
/// Compiler output nests the detail of an assignability failure with
/// indentation, and each `Types of property 'x' are incompatible.` line goes
/// one level deeper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PathMode {
    /// The path only grows: once a property is entered it stays on the path
    /// for every later line of the same diagnostic text, even for sibling or
    /// unrelated diagnostics that follow.
    #[default]
    Monotonic,
    /// The path follows indentation: before a line is processed, every path
    /// segment entered at the same or a deeper indentation is left. Blank
    /// lines do not affect the path.
    Indented,
}

impl PathMode {
    /// The lowercase name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::Indented => "indented",
        }
    }
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathMode {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "indented" => Ok(Self::Indented),
            _ => Err(AnalyzeError::UnknownPathMode(s.to_owned())),
        }
    }
}

/// Analyzer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Path tracking across lines.
    pub path_mode: PathMode,
    /// Collapse records with the same identity into the first occurrence.
    pub dedup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path_mode: PathMode::Monotonic,
            dedup: true,
        }
    }
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    path_mode: Option<PathMode>,
    dedup: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path tracking mode.
    ///
    /// Default: [`PathMode::Monotonic`]
    ///
    /// # Example
    ///
    /// ```
    /// use ts_error_analyzer::config::{ConfigBuilder, PathMode};
    ///
    /// let config = ConfigBuilder::new().path_mode(PathMode::Indented).build();
    /// assert_eq!(config.path_mode, PathMode::Indented);
    /// ```
    pub fn path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = Some(mode);
        self
    }

    /// Enable or disable duplicate collapsing.
    ///
    /// Default: `true`
    pub fn dedup(mut self, enabled: bool) -> Self {
        self.dedup = Some(enabled);
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    pub fn build(self) -> Config {
        let default = Config::default();
        Config {
            path_mode: self.path_mode.unwrap_or(default.path_mode),
            dedup: self.dedup.unwrap_or(default.dedup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.path_mode, PathMode::Monotonic);
        assert!(config.dedup);
    }

    #[test]
    fn test_builder() {
        let builder = ConfigBuilder::new().path_mode(PathMode::Indented);
        assert_eq!(builder.path_mode, Some(PathMode::Indented));
        assert_eq!(builder.dedup, None);

        let config = builder.dedup(false).build();
        assert_eq!(config.path_mode, PathMode::Indented);
        assert!(!config.dedup);
    }

    #[test]
    fn test_path_mode_parse() {
        assert_eq!("indented".parse::<PathMode>().unwrap(), PathMode::Indented);
        assert_eq!(" Monotonic ".parse::<PathMode>().unwrap(), PathMode::Monotonic);
        let err = "nested".parse::<PathMode>().unwrap_err();
        assert!(matches!(err, AnalyzeError::UnknownPathMode(ref s) if s == "nested"));
        assert_eq!(PathMode::Indented.to_string(), "indented");
    }
}
