//! tslgen — generate TSL headers and sources from file definitions.
//!
//! # Usage
//!
//! ```text
//! tslgen generate <definition> [--config <file>] [--out-dir <dir>] [--dry-run]
//! tslgen ci-status --git-sha <sha> [--step <name>] < run.json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ci_status::CiStatusArgs, generate::GenerateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "tslgen",
    version,
    about = "Generate TSL C++ headers and sources",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render and write every file of a YAML definition.
    Generate(GenerateArgs),

    /// Summarize generation jobs of a CI run read from stdin as 0 (ok) or 1 (failed).
    CiStatus(CiStatusArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => args.run().map(|()| ExitCode::SUCCESS),
        Commands::CiStatus(args) => args.run(),
    }
}
