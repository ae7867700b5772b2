//! Output writer. Existing files are truncated and rewritten.

use std::path::{Path, PathBuf};

use crate::error::{io_err, FileError};

/// Outcome of an individual file emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path } | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// Write `content` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_file(path: &Path, content: &str) -> Result<(), FileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| io_err(path, e))?;
    tracing::info!("wrote: {}", path.display());
    Ok(())
}
