use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use tslgen_core::config::GeneratorConfig;
use tslgen_core::types::{FileIdentity, FileInclude, FileKind, IncludeGuard};
use tslgen_renderer::context::merge_defaults;
use tslgen_renderer::{HeaderContext, RawContext, RenderError, TemplateKey, TemplateRegistry};

use super::{raw_includes, FileModel};
use crate::error::FileError;
use crate::includes::{push_unique, push_unique_edge, resolve_includes};

/// A generated header.
///
/// Two headers with the same include guard are the same logical file, even
/// when built independently from different contexts.
#[derive(Debug, Clone)]
pub struct HeaderFile {
    file_name: PathBuf,
    context: HeaderContext,
}

impl HeaderFile {
    /// Wrap an already complete context.
    ///
    /// Fails if any of `include_guard`, `namespace`, `file_includes`,
    /// `includes` or `codes` is absent; a missing `predefined_file_includes`
    /// becomes an empty list.
    pub fn new(file_name: impl Into<PathBuf>, raw: RawContext) -> Result<Self, FileError> {
        let file_name = file_name.into();
        let context = HeaderContext::from_raw(raw).map_err(|source| FileError::Construction {
            kind: FileKind::Header,
            path: file_name.clone(),
            source,
        })?;
        Ok(Self { file_name, context })
    }

    /// Build a header from a definition context, filling in derived values.
    ///
    /// Dates, guard, namespace, git metadata, the license block and the
    /// doxygen block are generated here; any of them present in `raw` wins.
    pub fn create_from_dict(
        config: &GeneratorConfig,
        templates: &dyn TemplateRegistry,
        file_name: impl Into<PathBuf>,
        raw: RawContext,
    ) -> Result<Self, FileError> {
        let file_name = file_name.into();
        let display_name = file_name.to_string_lossy().replace('\\', "/");
        let description = raw
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let license_text = templates.render(TemplateKey::License, &json!({ "year": config.year() }))?;
        let doxygen_block = templates.render(
            TemplateKey::DoxygenFile,
            &json!({
                "file_name": display_name,
                "date": config.build_date,
                "file_description": description,
            }),
        )?;

        let defaults = json!({
            "year": config.year(),
            "date": config.build_date,
            "file_description": description,
            "git_information": config.git.information,
            "git_version_str": config.git.version,
            "file_name": display_name,
            "include_guard": config.include_guard(&file_name),
            "namespace": config.namespace,
            "license_text": license_text,
            "doxygen_block": doxygen_block,
            "file_includes": [],
            "includes": [],
            "codes": [],
            "predefined_file_includes": [],
        });
        let defaults: RawContext = serde_json::from_value(defaults).map_err(RenderError::from)?;
        Self::new(file_name, merge_defaults(defaults, raw))
    }

    pub fn include_guard(&self) -> &IncludeGuard {
        &self.context.include_guard
    }

    pub fn context(&self) -> &HeaderContext {
        &self.context
    }

    /// Append an include emitted verbatim after all resolved includes.
    pub fn add_predefined_file_include(&mut self, include: &str) {
        if !push_unique(&mut self.context.predefined_file_includes, include.to_string()) {
            tracing::debug!("{}: predefined include {include} already present", self.file_name.display());
        }
    }

    /// Render `fragment` against this header's current context and append
    /// the result as a plain code fragment.
    ///
    /// The fragment is evaluated once; later mutations do not re-render it.
    pub fn add_code_to_be_rendered(
        &mut self,
        templates: &dyn TemplateRegistry,
        fragment: &str,
    ) -> Result<(), FileError> {
        let code = templates.render_fragment(fragment, &self.context.to_value()?)?;
        self.context.codes.push(code);
        Ok(())
    }

    /// The include list as it will be emitted.
    pub fn resolved_includes(&self) -> Vec<String> {
        resolve_includes(
            &self.file_name,
            &self.context.includes,
            &self.context.file_includes,
            &self.context.predefined_file_includes,
        )
    }
}

impl FileModel for HeaderFile {
    fn file_name(&self) -> &Path {
        &self.file_name
    }

    fn identity(&self) -> FileIdentity {
        FileIdentity::Header(self.context.include_guard.clone())
    }

    fn kind(&self) -> FileKind {
        FileKind::Header
    }

    fn add_include(&mut self, include: &str) {
        if !push_unique(&mut self.context.includes, include.to_string()) {
            tracing::debug!("{}: include {include} already present", self.file_name.display());
        }
    }

    fn add_file_include_edge(&mut self, edge: FileInclude) {
        let target = edge.identity.clone();
        if !push_unique_edge(&mut self.context.file_includes, edge) {
            tracing::debug!("{}: edge to {target} already recorded", self.file_name.display());
        }
    }

    fn import_includes(&mut self, raw: &RawContext) {
        for include in raw_includes(raw) {
            self.add_include(include);
        }
    }

    fn add_code(&mut self, code: &str) {
        self.context.codes.push(code.to_string());
    }

    fn render(&self, templates: &dyn TemplateRegistry) -> Result<String, FileError> {
        let mut context = self.context.clone();
        context.includes = self.resolved_includes();
        Ok(templates.render(TemplateKey::HeaderFile, &context.to_value()?)?)
    }
}

impl PartialEq for HeaderFile {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for HeaderFile {}

impl Hash for HeaderFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}
