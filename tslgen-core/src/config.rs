//! Generator configuration.
//!
//! One [`GeneratorConfig`] is built per run and handed by reference to every
//! file factory. Configuration files are YAML; every key is optional:
//!
//! ```yaml
//! namespace: tsl
//! include_guard_prefix: TUD_D2RG_TSL
//! include_guard_pattern: "[^A-Za-z0-9]"
//! template_dir: templates/
//! build_date: 2024-05-01
//! git:
//!   version: v0.3.1-4-gdeadbee
//!   information:
//!     - "branch: main"
//! ```

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::IncludeGuard;

pub const DEFAULT_NAMESPACE: &str = "tsl";
pub const DEFAULT_GUARD_PREFIX: &str = "TUD_D2RG_TSL";
pub const DEFAULT_GUARD_PATTERN: &str = "[^A-Za-z0-9]";

// ---------------------------------------------------------------------------
// On-disk shape
// ---------------------------------------------------------------------------

/// Version-control metadata stamped into generated headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Output of `git describe` or similar.
    pub version: String,
    /// Free-form lines (branch, commit, remote, ...).
    pub information: Vec<String>,
}

/// Raw YAML representation of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub namespace: String,
    pub include_guard_prefix: String,
    pub include_guard_pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    pub git: GitConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<NaiveDate>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            include_guard_prefix: DEFAULT_GUARD_PREFIX.to_string(),
            include_guard_pattern: DEFAULT_GUARD_PATTERN.to_string(),
            template_dir: None,
            git: GitConfig::default(),
            build_date: None,
        }
    }
}

// ---------------------------------------------------------------------------
// GeneratorConfig
// ---------------------------------------------------------------------------

/// Validated, ready-to-use generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub namespace: String,
    pub include_guard_prefix: String,
    include_guard_regex: Regex,
    pub template_dir: Option<PathBuf>,
    pub git: GitConfig,
    pub build_date: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            include_guard_prefix: DEFAULT_GUARD_PREFIX.to_string(),
            include_guard_regex: Regex::new(DEFAULT_GUARD_PATTERN)
                .expect("default include guard pattern is valid"),
            template_dir: None,
            git: GitConfig::default(),
            build_date: Local::now().date_naive(),
        }
    }
}

impl GeneratorConfig {
    /// Validate a raw [`ConfigFile`], compiling the guard pattern.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let include_guard_regex =
            Regex::new(&file.include_guard_pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: file.include_guard_pattern.clone(),
                source,
            })?;
        Ok(Self {
            namespace: file.namespace,
            include_guard_prefix: file.include_guard_prefix,
            include_guard_regex,
            template_dir: file.template_dir,
            git: file.git,
            build_date: file.build_date.unwrap_or_else(|| Local::now().date_naive()),
        })
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    /// Load configuration from a YAML file.
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` (with path + line context) if malformed.
    /// A relative `template_dir` is resolved against the config file's directory.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file: ConfigFile = serde_yaml::from_str(&contents).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if let (Some(dir), Some(base)) = (file.template_dir.as_ref(), path.parent()) {
            if dir.is_relative() {
                file.template_dir = Some(base.join(dir));
            }
        }
        Self::from_file(file)
    }

    /// `load_at` when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_at(p),
            None => Ok(Self::default()),
        }
    }

    pub fn include_guard_pattern(&self) -> &str {
        self.include_guard_regex.as_str()
    }

    pub fn year(&self) -> i32 {
        self.build_date.year()
    }

    /// Derive the include guard for a header at `path`.
    ///
    /// The path is upper-cased and every match of the guard pattern becomes
    /// `_`. The prefix is separated by `_` unless the substituted path already
    /// starts with one; no character of the path is dropped.
    pub fn include_guard(&self, path: &Path) -> IncludeGuard {
        let upper = path.to_string_lossy().replace('\\', "/").to_uppercase();
        let body = self.include_guard_regex.replace_all(&upper, "_");
        let separator = if body.starts_with('_') { "" } else { "_" };
        IncludeGuard(format!("{}{separator}{body}", self.include_guard_prefix))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
