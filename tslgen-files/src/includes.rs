//! Include resolution.
//!
//! Merges the three include sources of a file into the ordered, duplicate-free
//! list the templates emit:
//!
//! 1. plain includes, in the order they were added
//! 2. includes derived from file-include edges, as quoted paths relative to
//!    the including file's directory, in edge order
//! 3. predefined includes (headers only), verbatim
//!
//! A value already present is never appended again.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexSet;
use tslgen_core::types::FileInclude;

/// Append `item` unless an equal entry exists. Returns whether it was appended.
pub fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) -> bool {
    if list.contains(&item) {
        return false;
    }
    list.push(item);
    true
}

/// Append `edge` unless an edge to the same identity is already recorded.
pub fn push_unique_edge(edges: &mut Vec<FileInclude>, edge: FileInclude) -> bool {
    if edges.iter().any(|e| e.identity == edge.identity) {
        return false;
    }
    edges.push(edge);
    true
}

/// Lexically resolve `.` and `..` segments.
///
/// Leading `..` segments of a relative path are kept; `..` directly under
/// the root is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last().copied() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Path of `target` relative to the directory `from_dir`, `/`-separated.
///
/// Both paths are normalised first. `target` is returned as written when no
/// lexical answer exists: exactly one path is absolute, or leaving `from_dir`
/// would require climbing out of one of its leading `..` segments.
pub fn relative_include_path(from_dir: &Path, target: &Path) -> String {
    let from = normalize_path(from_dir);
    let target = normalize_path(target);
    if from.is_absolute() != target.is_absolute() {
        return to_slash(&target);
    }

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();
    let common = from_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if from_parts[common..].contains(&Component::ParentDir) {
        return to_slash(&target);
    }

    let mut segments: Vec<String> = Vec::new();
    segments.extend(std::iter::repeat("..".to_string()).take(from_parts.len() - common));
    segments.extend(
        target_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    segments.join("/")
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `y.h` → `"y.h"`
pub fn quoted(path: &str) -> String {
    format!("\"{path}\"")
}

/// Produce the final include list for the file at `current_file`.
pub fn resolve_includes(
    current_file: &Path,
    includes: &[String],
    file_includes: &[FileInclude],
    predefined_includes: &[String],
) -> Vec<String> {
    let current_dir = current_file.parent().unwrap_or_else(|| Path::new(""));
    let edges = file_includes
        .iter()
        .map(|edge| quoted(&relative_include_path(current_dir, edge.path())));

    let resolved: IndexSet<String> = includes
        .iter()
        .cloned()
        .chain(edges)
        .chain(predefined_includes.iter().cloned())
        .collect();
    resolved.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tslgen_core::types::{FileIdentity, IncludeGuard};

    fn header_edge(guard: &str, path: &str) -> FileInclude {
        FileInclude::new(FileIdentity::Header(IncludeGuard::from(guard)), path)
    }

    #[rstest]
    #[case("a/b", "a/y.h", "../y.h")]
    #[case("a", "a/y.h", "y.h")]
    #[case("", "y.h", "y.h")]
    #[case("", "a/y.h", "a/y.h")]
    #[case("a/b/c", "d/e.h", "../../../d/e.h")]
    #[case("a/./b", "a/b/../y.h", "../y.h")]
    #[case("/gen/a", "/gen/b/y.h", "../b/y.h")]
    #[case("../out", "../out/y.h", "y.h")]
    #[case("../a", "../b/y.h", "../b/y.h")]
    #[case("../a", "b/y.h", "b/y.h")]
    #[case("../../a/b", "c/y.h", "c/y.h")]
    fn relative_paths(#[case] from: &str, #[case] target: &str, #[case] expected: &str) {
        assert_eq!(relative_include_path(Path::new(from), Path::new(target)), expected);
    }

    #[test]
    fn mixed_absolute_and_relative_keeps_target() {
        assert_eq!(relative_include_path(Path::new("a"), Path::new("/abs/y.h")), "/abs/y.h");
    }

    #[test]
    fn including_dir_above_the_base_does_not_invent_parent_hops() {
        // "../../b/y.h" would name a sibling of the parent, not ./b/y.h.
        assert_ne!(relative_include_path(Path::new("../a"), Path::new("b/y.h")), "../../b/y.h");
    }

    #[test]
    fn normalize_keeps_leading_parent_dirs() {
        assert_eq!(normalize_path(Path::new("../a/./b/..")), PathBuf::from("../a"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn push_unique_keeps_first_seen_order() {
        let mut list = Vec::new();
        for item in ["b", "a", "b", "c", "a"] {
            push_unique(&mut list, item.to_string());
        }
        assert_eq!(list, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_edges_are_ignored_by_identity() {
        let mut edges = Vec::new();
        assert!(push_unique_edge(&mut edges, header_edge("G", "a/x.h")));
        // Same guard, different path: same logical header.
        assert!(!push_unique_edge(&mut edges, header_edge("G", "b/x.h")));
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn merge_order_is_plain_then_edges_then_predefined() {
        let resolved = resolve_includes(
            Path::new("vec/add.hpp"),
            &["<vector>".to_string()],
            &[header_edge("U", "vec/util.hpp")],
            &["<cstdint>".to_string()],
        );
        assert_eq!(resolved, vec!["<vector>", "\"util.hpp\"", "<cstdint>"]);
    }

    #[test]
    fn edge_already_listed_as_plain_include_is_not_repeated() {
        let resolved = resolve_includes(
            Path::new("a/x.h"),
            &["\"y.h\"".to_string()],
            &[header_edge("Y", "a/y.h")],
            &["\"y.h\"".to_string()],
        );
        assert_eq!(resolved, vec!["\"y.h\""]);
    }

    #[test]
    fn two_edges_resolving_to_same_text_appear_once() {
        let resolved = resolve_includes(
            Path::new("x.h"),
            &[],
            &[header_edge("A", "./y.h"), header_edge("B", "y.h")],
            &[],
        );
        assert_eq!(resolved, vec!["\"y.h\""]);
    }
}
