//! Error types for tslgen-files.

use std::path::PathBuf;

use thiserror::Error;

use tslgen_core::types::FileKind;
use tslgen_renderer::RenderError;

/// All errors that can arise while building, rendering and writing files.
#[derive(Debug, Error)]
pub enum FileError {
    /// A file model could not be constructed from its context.
    #[error("cannot construct {kind} file {path}: {source}")]
    Construction {
        kind: FileKind,
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// An error from the template registry.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on a definition file.
    #[error("failed to parse definition at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML parse error on in-memory definition text.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A definition entry is structurally valid YAML but not a valid file.
    #[error("invalid definition for {path}: {reason}")]
    InvalidDefinition { path: PathBuf, reason: String },
}

/// Convenience constructor for [`FileError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> FileError {
    FileError::Io {
        path: path.into(),
        source,
    }
}
