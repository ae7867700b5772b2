use assert_cmd::Command;
use predicates::prelude::*;

const RUN: &str = r#"{
  "jobs": [
    {"name": "run-generation-x", "head_sha": "4f2a9c1",
     "steps": [{"name": "Generate tsl", "conclusion": "success"}]},
    {"name": "run-generation-y", "head_sha": "4f2a9c1",
     "steps": [{"name": "Generate tsl", "conclusion": "failure"}]},
    {"name": "run-generation-z", "head_sha": "0000000",
     "steps": [{"name": "Generate tsl", "conclusion": "failure"}]}
  ]
}"#;

fn tslgen() -> Command {
    Command::cargo_bin("tslgen").expect("tslgen binary")
}

#[test]
fn failing_generation_job_fails_the_run() {
    let output = tslgen()
        .args(["ci-status", "--git-sha", "4f2a9c1"])
        .write_stdin(RUN)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<_> = stderr.lines().collect();
    assert_eq!(lines, vec!["run-generation-y failed"]);
}

#[test]
fn all_successful_jobs_pass() {
    tslgen()
        .args(["ci-status", "--git-sha", "0000000", "--step", "Compile"])
        .write_stdin(RUN)
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn malformed_payload_is_an_error() {
    tslgen()
        .args(["ci-status", "--git-sha", "4f2a9c1"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid run payload"));
}
