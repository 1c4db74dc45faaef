//! Runs the built binary end to end.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::tempdir;

fn run_maker(log_file: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_namedtuple-maker"))
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_TO_CONSOLE")
        .env("NO_COLOR", "1")
        .arg("--log-file")
        .arg(log_file)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn json_format_prints_only_the_record() {
    let dir = tempdir().unwrap();
    let output = run_maker(&dir.path().join("cli.log"), &["--auto", "--format", "json", "1", "2"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, json!({"index_0": 1, "index_1": 2}));
    let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["index_0", "index_1"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("** Logging level set to INFO **"));
}

#[test]
fn json_format_keeps_explicit_name_order() {
    let dir = tempdir().unwrap();
    let output = run_maker(
        &dir.path().join("cli.log"),
        &["--names", "last name,first", "--format", "json", "--json", r#"["Smith", "Alex"]"#],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, json!({"last_name": "Smith", "first": "Alex"}));
    assert!(stdout.find("last_name").unwrap() < stdout.find("first").unwrap());
}

#[test]
fn count_mismatch_exits_with_status_one() {
    let dir = tempdir().unwrap();
    let output = run_maker(&dir.path().join("cli.log"), &["--names", "a", "1", "2"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.ends_with("\n\n"), "stray blank line on stderr: {stderr:?}");
}

#[test]
fn demo_runs_clean() {
    let dir = tempdir().unwrap();
    let output = run_maker(&dir.path().join("cli.log"), &["--demo"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}
