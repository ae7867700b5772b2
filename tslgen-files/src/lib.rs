//! # tslgen-files
//!
//! File models for generated headers and sources, include resolution, and
//! the definition-driven generation pipeline.
//!
//! Build files with [`HeaderFile::create_from_dict`] /
//! [`SourceFile::create_from_dict`], connect them with
//! [`FileModel::add_file_include`], then [`FileModel::render`] or
//! [`FileModel::render_to_file`]. [`pipeline::generate`] does all of this for
//! a YAML [`Definition`].

pub mod definition;
pub mod error;
pub mod file_set;
pub mod includes;
pub mod model;
pub mod pipeline;
pub mod writer;

pub use definition::{Definition, FileDefinition};
pub use error::FileError;
pub use file_set::FileSet;
pub use model::{FileModel, GeneratedFile, HeaderFile, SourceFile};
pub use writer::WriteResult;
