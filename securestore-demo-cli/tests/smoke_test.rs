//! Smoke tests for securestore-demo-cli
//!
//! Every test runs against the in-memory vault so no OS credential store is
//! touched.

use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_securestore-demo"))
        .args(args)
        .env("SECURESTORE_RESOURCE", "securestore-smoke")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);
    let stdout = stdout(&output);

    assert!(output.status.success());
    for command in ["get", "set", "delete", "has", "list", "clear"] {
        assert!(stdout.contains(command), "Help should mention '{}'", command);
    }
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("securestore-demo"));
}

#[test]
fn test_has_on_empty_vault() {
    let output = run(&["--memory", "has", "api_token"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "false");
}

#[test]
fn test_get_with_default() {
    let output = run(&["--memory", "get", "api_token", "--default", "fallback"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "fallback");
}

#[test]
fn test_get_without_default_fails() {
    let output = run(&["--memory", "get", "api_token"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("api_token"));
}

#[test]
fn test_set_with_value() {
    let output = run(&["--memory", "set", "api_token", "abc123"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("api_token"));
}

#[test]
fn test_resource_from_env() {
    let output = run(&["--memory", "info"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("securestore-smoke"));
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"resource": "com.example.file", "restore_on_failed_set": true}}"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let output = Command::new(env!("CARGO_BIN_EXE_securestore-demo"))
        .args(["--memory", "--config", &path, "info"])
        .env_remove("SECURESTORE_RESOURCE")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command");
    let stdout = stdout(&output);

    assert!(output.status.success());
    assert!(stdout.contains("com.example.file"));
    assert!(stdout.contains("Restore on failed set: true"));
}

#[test]
fn test_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"resource": ""}}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let output = Command::new(env!("CARGO_BIN_EXE_securestore-demo"))
        .args(["--memory", "--config", &path, "info"])
        .env_remove("SECURESTORE_RESOURCE")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
