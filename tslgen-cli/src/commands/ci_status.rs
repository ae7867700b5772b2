//! `tslgen ci-status` — collapse a CI run's job list into a single outcome.
//!
//! The run payload is read from stdin. Every job built from `--git-sha` whose
//! name carries one of [`JOB_PREFIXES`] is checked for its `--step` step; one
//! `<job> failed` line goes to stderr per failing job, and `0`/`1` is printed
//! on stdout and used as exit status.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

pub const JOB_PREFIXES: &[&str] = &[
    "run-generation-",
    "run-compile-and-test-x86",
    "run-compile-and-test-aarch64",
];

const DEFAULT_STEP: &str = "Generate tsl";

/// Arguments for `tslgen ci-status`.
#[derive(Args, Debug)]
pub struct CiStatusArgs {
    /// Commit the jobs must have been run for.
    #[arg(long)]
    pub git_sha: String,

    /// Name of the step whose conclusion decides a job's outcome.
    #[arg(long, default_value = DEFAULT_STEP)]
    pub step: String,
}

#[derive(Debug, Deserialize)]
struct Run {
    jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
struct Job {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    head_sha: Option<String>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    name: String,
    #[serde(default)]
    conclusion: Option<String>,
}

impl CiStatusArgs {
    pub fn run(self) -> Result<ExitCode> {
        let mut payload = String::new();
        std::io::stdin()
            .read_to_string(&mut payload)
            .context("failed to read run payload from stdin")?;
        let run: Run = serde_json::from_str(&payload).context("invalid run payload")?;

        let failed = failed_jobs(&run, &self.git_sha, &self.step);
        for name in &failed {
            eprintln!("{name} failed");
        }
        if failed.is_empty() {
            println!("0");
            Ok(ExitCode::SUCCESS)
        } else {
            println!("1");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Names of the jobs for `git_sha` whose `step` did not conclude `success`,
/// in payload order.
fn failed_jobs<'a>(run: &'a Run, git_sha: &str, step: &str) -> Vec<&'a str> {
    run.jobs
        .iter()
        .filter(|job| job.head_sha.as_deref() == Some(git_sha))
        .filter_map(|job| {
            let name = job.name.as_deref().unwrap_or("<unknown>");
            if !JOB_PREFIXES.iter().any(|p| name.starts_with(p)) {
                return None;
            }
            let failed = job
                .steps
                .iter()
                .filter(|s| s.name == step)
                .any(|s| s.conclusion.as_deref() != Some("success"));
            failed.then_some(name)
        })
        .collect()
}
