//! YAML file definitions consumed by the generation pipeline.
//!
//! ```yaml
//! files:
//!   - kind: header
//!     path: vec/util.hpp
//!     description: shared helpers
//!     codes:
//!       - "template<typename T> struct identity { using type = T; };"
//!   - kind: header
//!     path: vec/add.hpp
//!     includes: ["<cstddef>"]
//!     predefined_includes: ["<cstdint>"]
//!     file_includes: [vec/util.hpp]
//!     rendered_codes:
//!       - "// part of {{ include_guard }}"
//!   - kind: source
//!     path: src/add.cpp
//!     file_includes: [vec/add.hpp]
//! ```
//!
//! Keys other than `kind`, `path`, `file_includes`, `predefined_includes`
//! and `rendered_codes` form the file's raw context. `rendered_codes` are
//! rendered after every edge of the definition is recorded, so they see the
//! header's final `file_includes`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use tslgen_core::types::FileKind;
use tslgen_renderer::RawContext;

use crate::error::FileError;

/// A set of files to generate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub files: Vec<FileDefinition>,
}

/// One generated file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDefinition {
    pub kind: FileKind,
    /// Output path, relative to the output directory.
    pub path: PathBuf,
    /// Paths of other entries this file includes.
    #[serde(default)]
    pub file_includes: Vec<PathBuf>,
    /// Header only.
    #[serde(default)]
    pub predefined_includes: Vec<String>,
    /// Header only: fragments rendered against the header's completed context.
    #[serde(default)]
    pub rendered_codes: Vec<String>,
    #[serde(flatten)]
    pub context: RawContext,
}

impl Definition {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FileError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a definition file. Parse errors carry the path.
    pub fn load_at(path: &Path) -> Result<Self, FileError> {
        let contents = std::fs::read_to_string(path).map_err(|e| crate::error::io_err(path, e))?;
        serde_yaml::from_str(&contents).map_err(|source| FileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
