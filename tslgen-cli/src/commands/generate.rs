//! `tslgen generate` — render and write the files of a definition.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tslgen_core::GeneratorConfig;
use tslgen_files::{pipeline, Definition, WriteResult};
use tslgen_renderer::TemplateEngine;

/// Arguments for `tslgen generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// YAML file listing the headers and sources to generate.
    pub definition: PathBuf,

    /// Generator configuration (namespace, include guards, templates, git info).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the definition's paths are relative to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let config = GeneratorConfig::load_or_default(self.config.as_deref())
            .context("failed to load generator config")?;
        let engine = TemplateEngine::new(config.template_dir.as_deref())
            .context("failed to load templates")?;
        let definition = Definition::load_at(&self.definition)
            .with_context(|| format!("failed to read {}", self.definition.display()))?;
        tracing::debug!(
            "{} files defined, namespace {}, output below {}",
            definition.files.len(),
            config.namespace,
            self.out_dir.display()
        );

        let results = pipeline::generate(&definition, &config, &engine, &self.out_dir, self.dry_run)
            .with_context(|| format!("generation failed for {}", self.definition.display()))?;
        print_results(&self.definition.display().to_string(), &results, self.dry_run);
        Ok(())
    }
}

fn print_results(definition: &str, writes: &[WriteResult], dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if writes.is_empty() {
        println!("{prefix}{} '{definition}' defines no files", "✓".green());
        return;
    }

    println!(
        "{prefix}{} '{definition}' generated ({} files)",
        "✓".green(),
        writes.len()
    );
    for r in writes {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
        }
    }
}
