//! End-to-end tests driving the `qc` binary against a temporary project.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn qc(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qc"))
        .arg("--project")
        .arg(project)
        .args(args)
        .env("HOME", project)
        .env("XDG_CONFIG_HOME", project.join(".config"))
        .env_remove("QUALCODE_LOG")
        .output()
        .expect("qc should run")
}

fn qc_json(project: &Path, args: &[&str]) -> Value {
    let out = qc(project, args);
    assert!(
        out.status.success(),
        "qc {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout should be JSON")
}

fn init_project() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let init = qc_json(dir.path(), &["init"]);
    assert_eq!(init["configWritten"], true);
    assert!(dir.path().join(".qualcode/config.toml").is_file());
    dir
}

#[test]
fn commands_fail_outside_a_project() {
    let dir = TempDir::new().expect("tempdir");
    let out = Command::new(env!("CARGO_BIN_EXE_qc"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["code", "list"])
        .output()
        .expect("qc should run");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("qc init"));
}

#[test]
fn init_is_idempotent() {
    let dir = init_project();
    let again = qc_json(dir.path(), &["init"]);
    assert_eq!(again["configWritten"], false);
}

#[test]
fn tree_apply_moves_codes_from_file() {
    let dir = init_project();
    let a = qc_json(dir.path(), &["code", "create", "Trust"])["id"].as_i64().unwrap();
    let b = qc_json(dir.path(), &["code", "create", "Distrust"])["id"].as_i64().unwrap();

    let tree_file = dir.path().join("tree.json");
    std::fs::write(
        &tree_file,
        format!(r#"[{{"id": {a}, "children": [{{"id": {b}}}]}}]"#),
    )
    .unwrap();

    let dry = qc_json(
        dir.path(),
        &["tree", "apply", tree_file.to_str().unwrap(), "--dry-run"],
    );
    assert_eq!(dry["updates"], serde_json::json!([{"id": b, "parentId": a}]));

    let saved = qc_json(dir.path(), &["tree", "apply", tree_file.to_str().unwrap()]);
    assert_eq!(saved["updated"], serde_json::json!([{"id": b, "parentId": a}]));
    assert_eq!(saved["tree"][0]["children"][0]["name"], "Distrust (0)");

    // Re-applying the same tree changes nothing.
    let again = qc_json(dir.path(), &["tree", "apply", tree_file.to_str().unwrap()]);
    assert_eq!(again["updated"], serde_json::json!([]));
}

#[test]
fn moving_code_under_its_descendant_fails() {
    let dir = init_project();
    let a = qc_json(dir.path(), &["code", "create", "A"])["id"].as_i64().unwrap();
    let b = qc_json(dir.path(), &["code", "create", "B"])["id"].as_i64().unwrap();
    qc_json(dir.path(), &["code", "move", &b.to_string(), "--parent", &a.to_string()]);

    let out = qc(
        dir.path(),
        &["code", "move", &a.to_string(), "--parent", &b.to_string()],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("cycle"));
}

#[test]
fn source_review_feeds_summary() {
    let dir = init_project();
    qc_json(
        dir.path(),
        &["source", "create", "--number", "1", "--name", "Interview", "--source-type", "interview"],
    );
    qc_json(dir.path(), &["source", "review", "1"]);

    let summary = qc_json(dir.path(), &["source", "summary"]);
    assert_eq!(summary["totalReviewed"], 1);
    assert_eq!(summary["bySourceType"]["interview"], 1);
}

#[test]
fn table_format_prints_per_type_columns() {
    let dir = init_project();
    let trust = qc_json(dir.path(), &["code", "create", "Trust"])["id"].as_i64().unwrap();
    let risk = qc_json(dir.path(), &["code", "create", "Risk"])["id"].as_i64().unwrap();
    qc_json(dir.path(), &["code", "move", &risk.to_string(), "--parent", &trust.to_string()]);

    let out = qc(dir.path(), &["--format", "table", "code", "list"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let header = stdout.lines().next().expect("header line");
    assert!(header.starts_with("id"));
    assert!(header.contains("parent") && header.contains("codings"));
    assert!(stdout.contains("root"));

    let out = qc(dir.path(), &["--format", "table", "tree", "show"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim_end(),
        format!("Trust (0)  [{trust}]\n  Risk (0)  [{risk}]")
    );
}
