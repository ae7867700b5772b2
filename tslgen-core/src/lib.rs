//! tslgen core library — generator configuration, file identity, errors.
//!
//! - [`config`] — [`GeneratorConfig`] and its YAML loader
//! - [`types`] — include guards, file identities, dependency edges
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{GeneratorConfig, GitConfig};
pub use error::ConfigError;
pub use types::{FileIdentity, FileInclude, FileKind, IncludeGuard};
