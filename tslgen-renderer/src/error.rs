//! Error types for tslgen-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from context building and template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building or typing a context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// No template is registered under the requested logical key.
    #[error("template '{key}' is not registered")]
    TemplateNotFound { key: String },

    /// A context lacks one of the keys its file kind requires.
    #[error("context is missing required key '{key}'")]
    MissingKey { key: &'static str },
}
