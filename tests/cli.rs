//! End-to-end runs of the `motion` binary.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const NESTED: &str = include_str!("../testdata/nested.go");

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("nested.go")
}

/// Run in an empty directory with an empty config so no user config leaks in.
fn motion(args: &[&str]) -> Output {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("empty.toml");
    fs::write(&config, "").unwrap();

    Command::new(env!("CARGO_BIN_EXE_motion"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn enclosing_as_json() {
    let file = fixture();
    let offset = NESTED.find("n++").unwrap().to_string();
    let output = motion(&[
        "--file",
        file.to_str().unwrap(),
        "--mode",
        "enclosing",
        "--offset",
        &offset,
    ]);

    assert!(output.status.success());
    let value = json(&output);
    assert_eq!(value["mode"], "enclosing");
    assert_eq!(value["func"]["sig"]["name"], "Walk");
    assert_eq!(value["func"]["func"]["line"], 17);
    assert_eq!(value["func"]["doc"]["line"], 16);
    assert_eq!(value["func"]["lbrace"]["col"], 65);
}

#[test]
fn query_errors_go_to_stdout() {
    let file = fixture();
    let output = motion(&[
        "--file",
        file.to_str().unwrap(),
        "--mode",
        "next",
        "--shift",
        "10",
    ]);

    assert!(output.status.success());
    assert_eq!(
        json(&output),
        serde_json::json!({"mode": "next", "err": "no functions found"})
    );
}

#[test]
fn unknown_mode_is_reported() {
    let file = fixture();
    let output = motion(&["--file", file.to_str().unwrap(), "--mode", "around"]);
    assert!(output.status.success());
    assert_eq!(json(&output)["err"], "wrong mode \"around\" passed");
}

#[test]
fn decls_as_plain_text() {
    let file = fixture();
    let output = motion(&[
        "--file",
        file.to_str().unwrap(),
        "--mode",
        "decls",
        "--include",
        "type,func",
        "--format",
        "plain",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with(":6:6 type type Point struct{X, Y int}"));
    assert!(lines[2].ends_with(":35:1 func func (p *Point) String() string"));
}

#[test]
fn comment_as_vim() {
    let file = fixture();
    let offset = NESTED.find("Point is").unwrap().to_string();
    let output = motion(&[
        "--file",
        file.to_str().unwrap(),
        "--mode",
        "comment",
        "--offset",
        &offset,
        "--format",
        "vim",
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim_end(),
        r#"{"comment": {"endCol": 24, "endLine": 5, "startCol": 1, "startLine": 5}, "mode": "comment"}"#
    );
}

#[test]
fn disabling_comments_drops_docs() {
    let file = fixture();
    let output = motion(&[
        "--file",
        file.to_str().unwrap(),
        "--mode",
        "next",
        "--parse-comments=false",
    ]);

    assert!(output.status.success());
    let value = json(&output);
    assert_eq!(value["func"]["sig"]["name"], "Walk");
    assert!(value["func"].get("doc").is_none());
}

#[test]
fn missing_input_fails() {
    let output = motion(&["--mode", "enclosing"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("file, src or dir is not specified"));
}

#[test]
fn syntax_errors_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.go");
    fs::write(&path, "package broken\n\nfunc {\n").unwrap();

    let output = motion(&["--file", path.to_str().unwrap(), "--mode", "decls"]);
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("syntax error"));
}

#[test]
fn config_sets_the_format() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("motion.toml");
    fs::write(&config, "format = \"plain\"\n").unwrap();
    let file = fixture();

    let output = Command::new(env!("CARGO_BIN_EXE_motion"))
        .current_dir(dir.path())
        .args(["--config", config.to_str().unwrap()])
        .args(["--file", file.to_str().unwrap(), "--mode", "next"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.trim_end().ends_with(":17:1 Walk"));
}
