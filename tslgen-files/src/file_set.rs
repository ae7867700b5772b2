//! Insertion-ordered, identity-deduplicated collection of file models.

use indexmap::map::Entry;
use indexmap::IndexMap;

use tslgen_core::types::FileIdentity;

use crate::model::FileModel;

/// Holds at most one file per [`FileIdentity`], in first-insertion order.
#[derive(Debug, Clone)]
pub struct FileSet<T> {
    files: IndexMap<FileIdentity, T>,
}

impl<T> Default for FileSet<T> {
    fn default() -> Self {
        Self { files: IndexMap::new() }
    }
}

impl<T: FileModel> FileSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `file` unless one with the same identity is present.
    /// Returns `false` (and drops `file`) for duplicates.
    pub fn insert(&mut self, file: T) -> bool {
        match self.files.entry(file.identity()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(file);
                true
            }
        }
    }

    pub fn get(&self, identity: &FileIdentity) -> Option<&T> {
        self.files.get(identity)
    }

    pub fn get_mut(&mut self, identity: &FileIdentity) -> Option<&mut T> {
        self.files.get_mut(identity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeneratedFile, HeaderFile, SourceFile};
    use serde_json::json;
    use tslgen_renderer::RawContext;

    fn raw(guard: &str) -> RawContext {
        match json!({
            "include_guard": guard, "namespace": "tsl",
            "file_includes": [], "includes": [], "codes": [],
            "license_text": "", "doxygen_block": "",
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn headers_with_same_guard_collapse() {
        let mut set = FileSet::new();
        assert!(set.insert(HeaderFile::new("a/x.hpp", raw("G")).unwrap()));
        assert!(!set.insert(HeaderFile::new("b/x.hpp", raw("G")).unwrap()));
        assert!(set.insert(HeaderFile::new("a/y.hpp", raw("H")).unwrap()));
        assert_eq!(set.len(), 2);

        let kept = set.get(&HeaderFile::new("z", raw("G")).unwrap().identity()).unwrap();
        assert_eq!(kept.file_name(), std::path::Path::new("a/x.hpp"));
    }

    #[test]
    fn mixed_kinds_keep_insertion_order() {
        let mut set: FileSet<GeneratedFile> = FileSet::new();
        set.insert(SourceFile::new("b.cpp", raw("")).unwrap().into());
        set.insert(HeaderFile::new("a.hpp", raw("A")).unwrap().into());
        set.insert(SourceFile::new("b.cpp", raw("")).unwrap().into());
        let names: Vec<_> = set.iter().map(|f| f.file_name().to_path_buf()).collect();
        assert_eq!(names, vec![std::path::PathBuf::from("b.cpp"), "a.hpp".into()]);
    }

    #[test]
    fn new_set_is_empty() {
        let set: FileSet<GeneratedFile> = FileSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
