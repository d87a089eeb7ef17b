use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("artipoll.toml");
    fs::write(&path, content).unwrap();
    path
}

fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_artipoll"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute artipoll")
}

#[test]
fn test_versions_without_searches_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), "[cache]\nprefix = \"igor\"\n");

    let output = run(&config, &["versions", "deb", "app/server", "--json"]);

    assert!(output.status.success());
    let versions: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(versions.is_empty());
}

#[test]
fn test_artifact_not_found_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), "[cache]\nprefix = \"igor\"\n");

    let output = run(&config, &["artifact", "deb", "app/server", "9.9.9"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Artifact not found"));
}

#[test]
fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &temp_dir.path().join("absent.toml"),
        &["versions", "deb", "app/server"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
}

#[test]
fn test_last_poll_requires_store_url() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), "[cache]\nprefix = \"igor\"\n");

    let output = run(&config, &["last-poll"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("store_url"));
}

#[test]
fn test_record_poll_unknown_search() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(
        temp_dir.path(),
        "[cache]\nprefix = \"igor\"\nstore_url = \"http://127.0.0.1:1\"\n",
    );

    let output = run(&config, &["record-poll", "missing", "--timestamp", "5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not configured"));
}
