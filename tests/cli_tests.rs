//! Exit statuses of the `ocsf-compat` binary
//!
//! Each run happens in an empty working directory with a cleared environment
//! so no configuration file or `OCSF_COMPAT__*` variable leaks in.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn fixture(version: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("schema-{}.json", version))
        .display()
        .to_string()
}

fn run_compat(args: &[&str]) -> Output {
    let home = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_ocsf-compat"))
        .args(args)
        .current_dir(home.path())
        .env_clear()
        .env("HOME", home.path())
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// Success and Incompatibility
// =============================================================================

#[test]
fn test_identical_schemas_exit_zero() {
    let schema = fixture("1.0.0");
    let output = run_compat(&["--before", &schema, "--after", &schema, "--no-color"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("compatible (0 fatal, 0 error, 0 warning, 0 info)"));
}

#[test]
fn test_breaking_changes_exit_two() {
    let output = run_compat(&[
        "--before",
        &fixture("1.0.0"),
        "--after",
        &fixture("1.1.0"),
        "--no-color",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("  [error] Event login (Login) was removed\n"));
    assert!(text.contains("incompatible (0 fatal, 6 error, 0 warning, 0 info)"));
}

#[test]
fn test_downgraded_findings_exit_zero() {
    let output = run_compat(&[
        "--before",
        &fixture("1.0.0"),
        "--after",
        &fixture("1.1.0"),
        "--no-color",
        "--warning",
        "RemovedEvent",
        "RemovedObject",
        "RemovedAttr",
        "IncreasedRequirement",
        "ChangedType",
        "ChangedIdentifier",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("compatible (0 fatal, 0 error, 6 warning, 0 info)"));
}

// =============================================================================
// Could Not Run
// =============================================================================

#[test]
fn test_unknown_flag_exits_one() {
    let output = run_compat(&["--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_missing_after_exits_one() {
    let output = run_compat(&["--before", &fixture("1.0.0")]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_finding_name_exits_one() {
    let schema = fixture("1.0.0");
    let output = run_compat(&["--before", &schema, "--after", &schema, "--info", "RemovedThing"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let output = run_compat(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--before"));
}
