//! Definition-driven generation: build every file, wire the include graph,
//! render and write.
//!
//! Files are built first so that every edge sees its target's final path;
//! rendering happens only after all edges are recorded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tslgen_core::config::GeneratorConfig;
use tslgen_core::types::{FileIdentity, FileKind};
use tslgen_renderer::TemplateRegistry;

use crate::definition::{Definition, FileDefinition};
use crate::error::FileError;
use crate::file_set::FileSet;
use crate::includes::normalize_path;
use crate::model::{FileModel, GeneratedFile, HeaderFile, SourceFile};
use crate::writer::{write_file, WriteResult};

fn invalid(def: &FileDefinition, reason: impl Into<String>) -> FileError {
    FileError::InvalidDefinition {
        path: def.path.clone(),
        reason: reason.into(),
    }
}

fn build_file(
    def: &FileDefinition,
    config: &GeneratorConfig,
    templates: &dyn TemplateRegistry,
) -> Result<GeneratedFile, FileError> {
    let path = normalize_path(&def.path);
    match def.kind {
        FileKind::Header => {
            let mut header =
                HeaderFile::create_from_dict(config, templates, path, def.context.clone())?;
            for include in &def.predefined_includes {
                header.add_predefined_file_include(include);
            }
            Ok(header.into())
        }
        FileKind::Source => {
            if !def.predefined_includes.is_empty() {
                return Err(invalid(def, "predefined_includes is only supported for headers"));
            }
            if !def.rendered_codes.is_empty() {
                return Err(invalid(def, "rendered_codes is only supported for headers"));
            }
            Ok(SourceFile::create_from_dict(config, templates, path, def.context.clone())?.into())
        }
    }
}

/// Build all files of `definition`, record their include edges, then render
/// each header's `rendered_codes` against its completed context.
///
/// A definition repeating an already-built file's path is dropped with a
/// warning; its `file_includes` still apply to the surviving file. Two
/// different paths mapping to the same identity (colliding include guards)
/// are an error.
pub fn build(
    definition: &Definition,
    config: &GeneratorConfig,
    templates: &dyn TemplateRegistry,
) -> Result<FileSet<GeneratedFile>, FileError> {
    let mut files: FileSet<GeneratedFile> = FileSet::new();
    let mut by_path: HashMap<PathBuf, FileIdentity> = HashMap::new();
    let mut kept = Vec::with_capacity(definition.files.len());

    for def in &definition.files {
        let file = build_file(def, config, templates)?;
        let identity = file.identity();
        let path = normalize_path(&def.path);
        if let Some(existing) = files.get(&identity) {
            if existing.file_name() != path.as_path() {
                return Err(invalid(
                    def,
                    format!("{identity} is already used by {}", existing.file_name().display()),
                ));
            }
            tracing::warn!("skipping duplicate definition of {identity} ({})", def.path.display());
            kept.push(false);
        } else {
            files.insert(file);
            kept.push(true);
        }
        by_path.insert(path, identity);
    }

    for def in &definition.files {
        let from = &by_path[&normalize_path(&def.path)];
        for target in &def.file_includes {
            let target_id = by_path.get(&normalize_path(target)).ok_or_else(|| {
                invalid(def, format!("file_includes references unknown file {}", target.display()))
            })?;
            let edge = match files.get(target_id) {
                Some(file) => file.as_file_include(),
                None => continue,
            };
            if let Some(file) = files.get_mut(from) {
                file.add_file_include_edge(edge);
            }
        }
    }

    for (def, _) in definition.files.iter().zip(kept).filter(|(_, kept)| *kept) {
        if def.rendered_codes.is_empty() {
            continue;
        }
        let id = &by_path[&normalize_path(&def.path)];
        if let Some(header) = files.get_mut(id).and_then(GeneratedFile::as_header_mut) {
            for fragment in &def.rendered_codes {
                header.add_code_to_be_rendered(templates, fragment)?;
            }
        }
    }

    Ok(files)
}

/// Build, render and write every file of `definition` below `out_dir`.
///
/// With `dry_run` nothing is written and every file reports
/// [`WriteResult::WouldWrite`].
pub fn generate(
    definition: &Definition,
    config: &GeneratorConfig,
    templates: &dyn TemplateRegistry,
    out_dir: &Path,
    dry_run: bool,
) -> Result<Vec<WriteResult>, FileError> {
    let files = build(definition, config, templates)?;
    if files.is_empty() {
        tracing::debug!("definition lists no files");
    }
    let mut results = Vec::with_capacity(files.len());

    for file in files.iter() {
        let text = file.render(templates)?;
        let path = out_dir.join(file.file_name());
        if dry_run {
            tracing::info!("[dry-run] would write: {}", path.display());
            results.push(WriteResult::WouldWrite { path });
        } else {
            write_file(&path, &text)?;
            results.push(WriteResult::Written { path });
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tslgen_renderer::TemplateEngine;

    fn config() -> GeneratorConfig {
        GeneratorConfig::from_yaml_str("build_date: 2024-01-01\n").unwrap()
    }

    #[test]
    fn empty_definition_generates_nothing() {
        let engine = TemplateEngine::new(None).unwrap();
        let out = TempDir::new().unwrap();
        let results =
            generate(&Definition::default(), &config(), &engine, out.path(), false).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn unknown_file_include_is_rejected() {
        let engine = TemplateEngine::new(None).unwrap();
        let def = Definition::from_yaml_str(
            "files:\n  - kind: header\n    path: a.hpp\n    file_includes: [missing.hpp]\n",
        )
        .unwrap();
        let err = build(&def, &config(), &engine).unwrap_err();
        assert!(matches!(err, FileError::InvalidDefinition { .. }), "got: {err}");
        assert!(err.to_string().contains("missing.hpp"));
    }

    #[test]
    fn header_only_fields_on_source_are_rejected() {
        let engine = TemplateEngine::new(None).unwrap();
        let def = Definition::from_yaml_str(
            "files:\n  - kind: source\n    path: a.cpp\n    predefined_includes: [\"<x>\"]\n",
        )
        .unwrap();
        assert!(matches!(
            build(&def, &config(), &engine).unwrap_err(),
            FileError::InvalidDefinition { .. }
        ));
    }

    #[test]
    fn duplicate_definitions_merge_edges_into_first() {
        let engine = TemplateEngine::new(None).unwrap();
        let def = Definition::from_yaml_str(
            "files:\n\
             \x20 - kind: header\n    path: util.hpp\n\
             \x20 - kind: header\n    path: a.hpp\n    codes: [first]\n\
             \x20 - kind: header\n    path: ./a.hpp\n    codes: [second]\n    file_includes: [util.hpp]\n",
        )
        .unwrap();
        let files = build(&def, &config(), &engine).unwrap();
        assert_eq!(files.len(), 2);

        let a = files
            .iter()
            .find_map(|f| f.as_header().filter(|h| h.file_name() == Path::new("a.hpp")))
            .unwrap();
        assert_eq!(a.context().codes, vec!["first"]);
        assert_eq!(a.resolved_includes(), vec!["\"util.hpp\""]);
    }

    #[test]
    fn colliding_guards_from_different_paths_are_rejected() {
        let engine = TemplateEngine::new(None).unwrap();
        let def = Definition::from_yaml_str(
            "files:\n  - kind: header\n    path: a-b.hpp\n  - kind: header\n    path: a_b.hpp\n",
        )
        .unwrap();
        let err = build(&def, &config(), &engine).unwrap_err();
        assert!(matches!(err, FileError::InvalidDefinition { .. }), "got: {err}");
        assert!(err.to_string().contains("a-b.hpp"), "got: {err}");
    }

    #[test]
    fn parent_relative_header_is_not_merged_into_sibling() {
        let engine = TemplateEngine::new(None).unwrap();
        let def = Definition::from_yaml_str(
            "files:\n  - kind: header\n    path: x.hpp\n  - kind: header\n    path: ../x.hpp\n",
        )
        .unwrap();
        assert_eq!(build(&def, &config(), &engine).unwrap().len(), 2);
    }

    #[test]
    fn rendered_codes_see_recorded_edges() {
        let engine = TemplateEngine::new(None).unwrap();
        let def = Definition::from_yaml_str(
            r#"
files:
  - kind: header
    path: vec/add.hpp
    file_includes: [vec/util.hpp]
    rendered_codes:
      - "{% for f in file_includes %}// depends on {{ f.path }}{% endfor %}"
  - kind: header
    path: vec/util.hpp
"#,
        )
        .unwrap();
        let files = build(&def, &config(), &engine).unwrap();
        let add = files
            .iter()
            .find_map(|f| f.as_header().filter(|h| h.file_name() == Path::new("vec/add.hpp")))
            .unwrap();
        assert_eq!(add.context().codes, vec!["// depends on vec/util.hpp"]);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let engine = TemplateEngine::new(None).unwrap();
        let out = TempDir::new().unwrap();
        let def = Definition::from_yaml_str("files:\n  - kind: header\n    path: a/b.hpp\n").unwrap();
        let results = generate(&def, &config(), &engine, out.path(), true).unwrap();
        assert_eq!(
            results,
            vec![WriteResult::WouldWrite { path: out.path().join("a/b.hpp") }]
        );
        assert!(!out.path().join("a").exists());
    }
}
