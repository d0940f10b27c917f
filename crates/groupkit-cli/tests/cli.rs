//! Integration tests for the groupkit binary.
//!
//! Each test writes a comps catalog and a package list to a temp dir and
//! runs the built binary against them.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const COMPS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<comps>
  <group>
    <id>graphical-internet</id>
    <packagelist>
      <packagereq>firefox</packagereq>
      <packagereq>thunderbird</packagereq>
    </packagelist>
  </group>
  <group>
    <id>text-internet</id>
    <packagelist><packagereq>mutt</packagereq></packagelist>
  </group>
</comps>
"#;

const PACKAGES: &str = r#"[
  {"name": "firefox", "evr": "131.0-1.fc41", "arch": "x86_64", "repo_id": "@System", "install_time": 1727000000, "summary": "Web browser"},
  {"name": "thunderbird", "evr": "128.3-1.fc41", "arch": "x86_64", "repo_id": "updates", "summary": "Mail client"},
  {"name": "mutt", "evr": "5:2.2.13-1.fc41", "arch": "x86_64", "repo_id": "fedora", "summary": "Text mail client"}
]"#;

/// Write the catalog and package list, returning their paths.
fn create_test_env() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let comps = temp_dir.path().join("comps.xml");
    let packages = temp_dir.path().join("packages.json");
    std::fs::write(&comps, COMPS).unwrap();
    std::fs::write(&packages, PACKAGES).unwrap();
    (temp_dir, comps, packages)
}

fn repo_arg(id: &str, path: &Path) -> String {
    format!("{}={}", id, path.display())
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_groupkit"))
        .args(args)
        .env("LANG", "C")
        .env_remove("LANGUAGE")
        .env_remove("LC_ALL")
        .env_remove("LC_MESSAGES")
        .output()
        .expect("Failed to run groupkit")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_resolve_prints_package_names() {
    let (_dir, comps, _) = create_test_env();
    let repo = repo_arg("fedora", &comps);

    let output = run(&["--repo", &repo, "internet"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["firefox", "thunderbird", "mutt"]);
}

#[test]
fn test_search_reports_packages_with_ids() {
    let (_dir, comps, packages) = create_test_env();
    let repo = repo_arg("fedora", &comps);
    let packages = packages.display().to_string();

    let output = run(&["--repo", &repo, "--packages", &packages, "internet"]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(lines
        .iter()
        .any(|l| l == "installed\tfirefox;131.0-1.fc41;x86_64;@System\tWeb browser"));
    assert!(lines
        .iter()
        .any(|l| l == "available\tmutt;5:2.2.13-1.fc41;x86_64;fedora\tText mail client"));
}

#[test]
fn test_search_json_with_installed_filter() {
    let (_dir, comps, packages) = create_test_env();
    let repo = repo_arg("fedora", &comps);
    let packages = packages.display().to_string();

    let output = run(&[
        "--repo",
        &repo,
        "--packages",
        &packages,
        "--installed",
        "--json",
        "internet",
    ]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    let value: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["info"], "installed");
    assert_eq!(value["package_id"], "firefox;131.0-1.fc41;x86_64;@System");
}

#[test]
fn test_unknown_group_prints_nothing() {
    let (_dir, comps, _) = create_test_env();
    let repo = repo_arg("fedora", &comps);

    let output = run(&["--repo", &repo, "no-such-group"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_search_without_repos_fails() {
    let (_dir, _, packages) = create_test_env();
    let packages = packages.display().to_string();

    let output = run(&["--packages", &packages, "internet"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_malformed_repo_argument_rejected() {
    let output = run(&["--repo", "fedora", "internet"]);
    assert!(!output.status.success());
}

#[test]
fn test_resolve_without_repos_fails() {
    let output = run(&["internet"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to find any repos"));
}
