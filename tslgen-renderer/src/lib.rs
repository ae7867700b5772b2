//! # tslgen-renderer
//!
//! Tera-based template registry and the typed contexts generated headers and
//! sources are rendered from.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use serde_json::json;
//! use tslgen_renderer::{TemplateEngine, TemplateKey, TemplateRegistry};
//!
//! fn license(year: i32) -> Result<String, tslgen_renderer::RenderError> {
//!     let engine = TemplateEngine::new(None)?;
//!     engine.render(TemplateKey::License, &json!({ "year": year }))
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{HeaderContext, RawContext, SourceContext};
pub use engine::{TemplateEngine, TemplateKey, TemplateRegistry};
pub use error::RenderError;
