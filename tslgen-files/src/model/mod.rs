//! File models — in-memory generated headers and sources.
//!
//! Both variants share the [`FileModel`] surface; [`GeneratedFile`] wraps
//! either for containers that hold a mix.

mod header;
mod source;

use std::path::Path;

use tslgen_core::types::{FileIdentity, FileInclude, FileKind};
use tslgen_renderer::{RawContext, TemplateRegistry};

use crate::error::FileError;
use crate::writer;

pub use header::HeaderFile;
pub use source::SourceFile;

/// Operations common to every generated file.
pub trait FileModel {
    /// Path the file is rendered to; include paths are resolved from its parent.
    fn file_name(&self) -> &Path;

    /// Deduplication key: include guard for headers, path for sources.
    fn identity(&self) -> FileIdentity;

    fn kind(&self) -> FileKind;

    /// Append a plain include (`<vector>`, `"foo.h"`) unless already present.
    fn add_include(&mut self, include: &str);

    /// Record a dependency edge unless one to the same identity exists.
    fn add_file_include_edge(&mut self, edge: FileInclude);

    /// Bulk-import the `includes` sequence of `raw`; other keys are ignored.
    fn import_includes(&mut self, raw: &RawContext);

    /// Append a preformatted code fragment.
    fn add_code(&mut self, code: &str);

    /// Resolve includes and render the file's template.
    fn render(&self, templates: &dyn TemplateRegistry) -> Result<String, FileError>;

    /// The edge other files record when they include this one.
    fn as_file_include(&self) -> FileInclude {
        FileInclude::new(self.identity(), self.file_name())
    }

    /// Record a dependency on `other`.
    fn add_file_include(&mut self, other: &dyn FileModel) {
        self.add_file_include_edge(other.as_file_include());
    }

    /// Render and write the result to [`FileModel::file_name`], replacing any
    /// existing content.
    fn render_to_file(&self, templates: &dyn TemplateRegistry) -> Result<(), FileError> {
        let text = self.render(templates)?;
        writer::write_file(self.file_name(), &text)
    }
}

/// Pull string entries out of `raw["includes"]`; non-string entries are skipped.
pub(crate) fn raw_includes(raw: &RawContext) -> impl Iterator<Item = &str> {
    raw.get("includes")
        .and_then(|v| v.as_array())
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str())
}

// ---------------------------------------------------------------------------
// GeneratedFile
// ---------------------------------------------------------------------------

/// Either kind of generated file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneratedFile {
    Header(HeaderFile),
    Source(SourceFile),
}

impl GeneratedFile {
    pub fn as_header(&self) -> Option<&HeaderFile> {
        match self {
            GeneratedFile::Header(h) => Some(h),
            GeneratedFile::Source(_) => None,
        }
    }

    pub fn as_header_mut(&mut self) -> Option<&mut HeaderFile> {
        match self {
            GeneratedFile::Header(h) => Some(h),
            GeneratedFile::Source(_) => None,
        }
    }

    fn inner(&self) -> &dyn FileModel {
        match self {
            GeneratedFile::Header(h) => h,
            GeneratedFile::Source(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn FileModel {
        match self {
            GeneratedFile::Header(h) => h,
            GeneratedFile::Source(s) => s,
        }
    }
}

impl From<HeaderFile> for GeneratedFile {
    fn from(h: HeaderFile) -> Self {
        GeneratedFile::Header(h)
    }
}

impl From<SourceFile> for GeneratedFile {
    fn from(s: SourceFile) -> Self {
        GeneratedFile::Source(s)
    }
}

impl FileModel for GeneratedFile {
    fn file_name(&self) -> &Path {
        self.inner().file_name()
    }

    fn identity(&self) -> FileIdentity {
        self.inner().identity()
    }

    fn kind(&self) -> FileKind {
        self.inner().kind()
    }

    fn add_include(&mut self, include: &str) {
        self.inner_mut().add_include(include)
    }

    fn add_file_include_edge(&mut self, edge: FileInclude) {
        self.inner_mut().add_file_include_edge(edge)
    }

    fn import_includes(&mut self, raw: &RawContext) {
        self.inner_mut().import_includes(raw)
    }

    fn add_code(&mut self, code: &str) {
        self.inner_mut().add_code(code)
    }

    fn render(&self, templates: &dyn TemplateRegistry) -> Result<String, FileError> {
        self.inner().render(templates)
    }
}
