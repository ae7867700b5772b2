//! Identity types shared by the file models and the generation driver.
//!
//! A generated header is identified by its include guard, a generated
//! translation unit by its path. Both collapse into [`FileIdentity`], the key
//! every deduplicating container in the workspace uses.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Preprocessor include guard of a generated header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncludeGuard(pub String);

impl IncludeGuard {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncludeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for IncludeGuard {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IncludeGuard {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The two flavours of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Header,
    Source,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Header => write!(f, "header"),
            FileKind::Source => write!(f, "source"),
        }
    }
}

/// Deduplication key of a generated file.
///
/// Headers compare by include guard so that two passes deriving the same
/// logical header collapse into one. Sources compare by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum FileIdentity {
    Header(IncludeGuard),
    Source(PathBuf),
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileIdentity::Header(guard) => write!(f, "header {guard}"),
            FileIdentity::Source(path) => write!(f, "source {}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dependency edges
// ---------------------------------------------------------------------------

/// A recorded dependency on another generated file.
///
/// Captures the target's identity (for edge deduplication) and its path (for
/// relative include resolution at render time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInclude {
    pub identity: FileIdentity,
    pub path: PathBuf,
}

impl FileInclude {
    pub fn new(identity: FileIdentity, path: impl Into<PathBuf>) -> Self {
        Self {
            identity,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
