use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use tslgen_core::config::GeneratorConfig;
use tslgen_core::types::{FileIdentity, FileInclude, FileKind};
use tslgen_renderer::context::merge_defaults;
use tslgen_renderer::{RawContext, RenderError, SourceContext, TemplateKey, TemplateRegistry};

use super::{raw_includes, FileModel};
use crate::error::FileError;
use crate::includes::{push_unique, push_unique_edge, resolve_includes};

/// A generated translation unit. Identified by its path.
#[derive(Debug, Clone)]
pub struct SourceFile {
    file_name: PathBuf,
    context: SourceContext,
}

impl SourceFile {
    /// Wrap an already complete context.
    pub fn new(file_name: impl Into<PathBuf>, raw: RawContext) -> Result<Self, FileError> {
        let file_name = file_name.into();
        let context = SourceContext::from_raw(raw).map_err(|source| FileError::Construction {
            kind: FileKind::Source,
            path: file_name.clone(),
            source,
        })?;
        Ok(Self { file_name, context })
    }

    /// Build a source from a definition context; license, doxygen block and
    /// namespace are generated unless `raw` provides them.
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
            .unwrap_or_default();

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
            "file_name": display_name,
            "license_text": license_text,
            "doxygen_block": doxygen_block,
            "namespace": config.namespace,
            "file_includes": [],
            "includes": [],
            "codes": [],
        });
        let defaults: RawContext = serde_json::from_value(defaults).map_err(RenderError::from)?;
        Self::new(file_name, merge_defaults(defaults, raw))
    }

    pub fn context(&self) -> &SourceContext {
        &self.context
    }

    /// The include list as it will be emitted.
    pub fn resolved_includes(&self) -> Vec<String> {
        resolve_includes(
            &self.file_name,
            &self.context.includes,
            &self.context.file_includes,
            &[],
        )
    }
}

impl FileModel for SourceFile {
    fn file_name(&self) -> &Path {
        &self.file_name
    }

    fn identity(&self) -> FileIdentity {
        FileIdentity::Source(self.file_name.clone())
    }

    fn kind(&self) -> FileKind {
        FileKind::Source
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
        Ok(templates.render(TemplateKey::SourceFile, &context.to_value()?)?)
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for SourceFile {}

impl Hash for SourceFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}
