//! Tera rendering engine — [`TemplateKey`] enum, [`TemplateRegistry`] seam and
//! the default [`TemplateEngine`].
//!
//! # Logical keys
//!
//! | Key            | Renders                                      |
//! |----------------|----------------------------------------------|
//! | `header_file`  | a complete generated header                  |
//! | `source_file`  | a complete generated translation unit        |
//! | `license`      | the license comment block                    |
//! | `doxygen_file` | the doxygen `\file` block of a generated file |

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tera::Tera;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("header_file", include_str!("templates/header_file.tera")),
    ("source_file", include_str!("templates/source_file.tera")),
    ("license", include_str!("templates/license.tera")),
    ("doxygen_file", include_str!("templates/doxygen_file.tera")),
];

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

/// `License.tera` → `license`; anything but a `.tera` file → `None`.
fn override_name(path: &Path) -> Option<String> {
    if path.extension()? != "tera" {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().to_lowercase())
}

/// Read the `.tera` files directly inside `dir`, sorted by file name.
/// A missing directory yields no overrides.
fn load_overrides(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| io_err(dir, e)))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    paths
        .into_iter()
        .filter(|p| p.is_file())
        .filter_map(|p| override_name(&p).map(|name| (name, p)))
        .map(|(name, p)| {
            let text = std::fs::read_to_string(&p).map_err(|e| io_err(&p, e))?;
            Ok((name, text))
        })
        .collect()
}

fn build_tera(templates: HashMap<String, String>) -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    // Generated C++ must never be HTML-escaped.
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(templates)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateKey
// ---------------------------------------------------------------------------

/// Stable logical names of the templates the file models render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    HeaderFile,
    SourceFile,
    License,
    DoxygenFile,
}

impl TemplateKey {
    /// All keys in a stable order.
    pub fn all() -> &'static [TemplateKey] {
        &[
            TemplateKey::HeaderFile,
            TemplateKey::SourceFile,
            TemplateKey::License,
            TemplateKey::DoxygenFile,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::HeaderFile => "header_file",
            TemplateKey::SourceFile => "source_file",
            TemplateKey::License => "license",
            TemplateKey::DoxygenFile => "doxygen_file",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TemplateRegistry
// ---------------------------------------------------------------------------

/// Lookup-and-render service the file models depend on.
///
/// Implementations are read-only once built; generation only ever takes a
/// shared reference.
pub trait TemplateRegistry: Send + Sync {
    /// Render the template registered under `key` against `context`.
    fn render(&self, key: TemplateKey, context: &Value) -> Result<String, RenderError>;

    /// Render an ad-hoc template string against `context`.
    fn render_fragment(&self, fragment: &str, context: &Value) -> Result<String, RenderError>;
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based [`TemplateRegistry`] with optional user overrides.
///
/// `user_template_dir` may contain `<key>.tera` files that replace the
/// embedded defaults; file names are matched case-insensitively.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Embedded templates, with `user_template_dir` overrides applied.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut templates: HashMap<String, String> = TPLS
            .iter()
            .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
            .collect();
        if let Some(dir) = user_template_dir {
            templates.extend(load_overrides(dir)?);
        }
        Ok(TemplateEngine { tera: build_tera(templates)? })
    }

    /// Construct an engine from an explicit template set, without the
    /// embedded defaults.
    pub fn from_templates<I, N, C>(templates: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let templates = templates
            .into_iter()
            .map(|(name, content)| (name.into(), content.into()))
            .collect();
        Ok(TemplateEngine { tera: build_tera(templates)? })
    }

    /// Whether a template is registered under `key`.
    pub fn contains(&self, key: TemplateKey) -> bool {
        self.tera.get_template_names().any(|name| name == key.as_str())
    }
}

impl TemplateRegistry for TemplateEngine {
    fn render(&self, key: TemplateKey, context: &Value) -> Result<String, RenderError> {
        if !self.contains(key) {
            return Err(RenderError::TemplateNotFound { key: key.to_string() });
        }
        let ctx = tera::Context::from_value(context.clone())?;
        Ok(self.tera.render(key.as_str(), &ctx)?)
    }

    fn render_fragment(&self, fragment: &str, context: &Value) -> Result<String, RenderError> {
        let ctx = tera::Context::from_value(context.clone())?;
        Ok(Tera::one_off(fragment, &ctx, false)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
