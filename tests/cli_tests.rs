//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const STORE_FIXTURE: &str = r#"[
  {"email": "shop@alias.example", "folder": "Receipts", "labels": ["Shopping"]},
  {"email": "bare@alias.example", "folder": null, "labels": []},
  {"email": "news@alias.example", "folder": null, "labels": ["Newsletters"]}
]"#;

const SETTINGS_FIXTURE: &str = r#"[simplelogin]
api_key = "sl-test-key"

[mail]
host = "mail.example.com"
port = 143
username = "user@example.com"
password = "secret"
folders = ["Receipts"]
labels = ["Shopping", "Newsletters"]
"#;

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alias-sieve"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("alias-sieve"));
}

#[test]
fn test_cli_help_lists_subcommands() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alias-sieve"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sync SimpleLogin aliases"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("compile"));
}

#[test]
fn test_compile_renders_assigned_records() {
    let tmp = TempDir::new().expect("tmp");
    let store = tmp.path().join("aliases.json");
    let output = tmp.path().join("sieve_script.sieve");
    fs::write(&store, STORE_FIXTURE).expect("write store");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alias-sieve"));
    cmd.args([
        "compile",
        "--store",
        store.to_str().expect("utf8 path"),
        "--output",
        output.to_str().expect("utf8 path"),
    ]);
    cmd.assert().success().stdout(predicate::str::contains("3 aliases"));

    let script = fs::read_to_string(&output).expect("read script");
    assert!(script.starts_with("require ["));
    assert!(script
        .contains("if header :is \"X-Simplelogin-Envelope-To\" \"shop@alias.example\" {"));
    assert!(script.contains("    fileinto \"Receipts\";\n    fileinto \"Shopping\";\n    stop;"));
    assert!(script.contains("fileinto \"Newsletters\";"));
    // No folder and no labels means no block at all.
    assert!(!script.contains("bare@alias.example"));
}

#[test]
fn test_compile_is_byte_stable_across_runs() {
    let tmp = TempDir::new().expect("tmp");
    let store = tmp.path().join("aliases.json");
    fs::write(&store, STORE_FIXTURE).expect("write store");

    let first = tmp.path().join("first.sieve");
    let second = tmp.path().join("second.sieve");
    for output in [&first, &second] {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alias-sieve"));
        cmd.args([
            "compile",
            "--store",
            store.to_str().expect("utf8 path"),
            "--output",
            output.to_str().expect("utf8 path"),
        ]);
        cmd.assert().success();
    }

    let first = fs::read_to_string(&first).expect("read first");
    let second = fs::read_to_string(&second).expect("read second");
    assert_eq!(first, second);
}

#[test]
fn test_compile_missing_store_yields_preamble_only_script() {
    let tmp = TempDir::new().expect("tmp");
    let output = tmp.path().join("sieve_script.sieve");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alias-sieve"));
    cmd.args([
        "compile",
        "--store",
        tmp.path().join("absent.json").to_str().expect("utf8 path"),
        "--output",
        output.to_str().expect("utf8 path"),
    ]);
    cmd.assert().success().stdout(predicate::str::contains("0 aliases"));

    let script = fs::read_to_string(&output).expect("read script");
    assert!(script.starts_with("require ["));
    assert!(!script.contains("if header"));
}

#[test]
fn test_compile_malformed_store_warns_and_degrades_to_empty() {
    let tmp = TempDir::new().expect("tmp");
    let store = tmp.path().join("aliases.json");
    let output = tmp.path().join("sieve_script.sieve");
    fs::write(&store, "{definitely not an array").expect("write store");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alias-sieve"));
    cmd.args([
        "compile",
        "--store",
        store.to_str().expect("utf8 path"),
        "--output",
        output.to_str().expect("utf8 path"),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0 aliases"))
        .stderr(predicate::str::contains("Malformed alias store"));
}

#[test]
fn test_sync_no_fetch_no_assign_compiles_from_store() {
    let tmp = TempDir::new().expect("tmp");
    let config = tmp.path().join("alias-sieve.toml");
    let store = tmp.path().join("aliases.json");
    let output = tmp.path().join("sieve_script.sieve");
    fs::write(&config, SETTINGS_FIXTURE).expect("write settings");
    fs::write(&store, STORE_FIXTURE).expect("write store");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("alias-sieve"));
    cmd.args([
        "sync",
        "--no-fetch",
        "--no-assign",
        "--config",
        config.to_str().expect("utf8 path"),
        "--store",
        store.to_str().expect("utf8 path"),
        "--output",
        output.to_str().expect("utf8 path"),
    ]);
    cmd.assert().success().stdout(predicate::str::contains("Sieve script written"));

    let script = fs::read_to_string(&output).expect("read script");
    assert!(script.contains("shop@alias.example"));
}
