//! Template contexts — typed rendering payloads for headers and sources.
//!
//! Required keys are named fields; everything else a definition supplies
//! (dates, descriptions, git metadata, template-specific values) lives in the
//! flattened `extra` bag and reaches templates under its own key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tslgen_core::types::{FileInclude, IncludeGuard};

use crate::error::RenderError;

/// Loosely-typed context as it arrives from a YAML definition.
pub type RawContext = serde_json::Map<String, Value>;

/// Keys every header context must carry.
pub const HEADER_REQUIRED_KEYS: &[&str] =
    &["include_guard", "namespace", "file_includes", "includes", "codes"];

/// Keys every source context must carry.
pub const SOURCE_REQUIRED_KEYS: &[&str] = &[
    "license_text",
    "doxygen_block",
    "namespace",
    "file_includes",
    "includes",
    "codes",
];

/// Rendering payload of a generated header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderContext {
    pub include_guard: IncludeGuard,
    pub namespace: String,
    pub file_includes: Vec<FileInclude>,
    pub includes: Vec<String>,
    pub codes: Vec<String>,
    /// Includes emitted verbatim after all resolved ones.
    #[serde(default)]
    pub predefined_file_includes: Vec<String>,
    #[serde(flatten)]
    pub extra: RawContext,
}

/// Rendering payload of a generated translation unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContext {
    pub license_text: String,
    pub doxygen_block: String,
    pub namespace: String,
    pub file_includes: Vec<FileInclude>,
    pub includes: Vec<String>,
    pub codes: Vec<String>,
    #[serde(flatten)]
    pub extra: RawContext,
}

fn require_keys(raw: &RawContext, keys: &[&'static str]) -> Result<(), RenderError> {
    match keys.iter().find(|k| !raw.contains_key(**k)) {
        Some(key) => Err(RenderError::MissingKey { key }),
        None => Ok(()),
    }
}

impl HeaderContext {
    /// Validate and type a raw context. `predefined_file_includes` defaults to empty.
    pub fn from_raw(raw: RawContext) -> Result<Self, RenderError> {
        require_keys(&raw, HEADER_REQUIRED_KEYS)?;
        serde_json::from_value(Value::Object(raw)).map_err(RenderError::from)
    }

    /// Convert to the JSON value handed to the template registry.
    pub fn to_value(&self) -> Result<Value, RenderError> {
        serde_json::to_value(self).map_err(RenderError::from)
    }
}

impl SourceContext {
    pub fn from_raw(raw: RawContext) -> Result<Self, RenderError> {
        require_keys(&raw, SOURCE_REQUIRED_KEYS)?;
        serde_json::from_value(Value::Object(raw)).map_err(RenderError::from)
    }

    pub fn to_value(&self) -> Result<Value, RenderError> {
        serde_json::to_value(self).map_err(RenderError::from)
    }
}

/// Overlay `overrides` on top of `defaults`; keys present in both keep the
/// override's value.
pub fn merge_defaults(mut defaults: RawContext, overrides: RawContext) -> RawContext {
    for (key, value) in overrides {
        defaults.insert(key, value);
    }
    defaults
}
