//! Error types for tslgen-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading the generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML parse error for in-memory configuration text.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `include_guard_pattern` is not a valid regular expression.
    #[error("invalid include guard pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
