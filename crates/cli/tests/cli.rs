use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn wasmbuild() -> Command {
    Command::cargo_bin("wasmbuild").unwrap()
}

#[test]
fn test_remote_root_runs_no_stage() {
    wasmbuild()
        .args(["build", "--root", "https://example.com/graph"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid invocation context"));
}

#[test]
fn test_missing_root_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    wasmbuild()
        .args(["build", "--dry-run", "--root"])
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Final command").not());
}

#[test]
fn test_dry_run_prints_plan() {
    let temp_dir = TempDir::new().unwrap();

    wasmbuild()
        .args(["build", "--dry-run", "--root"])
        .arg(temp_dir.path())
        .env("HOME", "/home/dev")
        .assert()
        .success()
        .stdout(predicate::str::contains("cargo fmt --all"))
        .stdout(predicate::str::contains(
            "cargo build --release --no-default-features --features wasm --target wasm32-unknown-unknown",
        ))
        .stdout(predicate::str::contains("SOURCE_DATE_EPOCH=1600000000"))
        .stdout(predicate::str::contains("--remap-path-prefix=/home/dev=~"))
        .stdout(predicate::str::contains("wasm-bindgen"))
        .stdout(predicate::str::contains("deno fmt --quiet"));

    assert!(!temp_dir.path().join("lib").exists());
}

#[test]
fn test_init_then_config() {
    let temp_dir = TempDir::new().unwrap();

    wasmbuild()
        .args(["init", "--root"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));
    assert!(temp_dir.path().join(".wasmbuild.json").exists());

    wasmbuild()
        .args(["init", "--root"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let config = temp_dir.path().join(".wasmbuild.json");
    fs::write(&config, r#"{ "crate_name": "my_lib" }"#).unwrap();

    wasmbuild()
        .args(["config", "--root"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"crate_name\": \"my_lib\""))
        .stdout(predicate::str::contains("\"lib_dir\": \"lib\""));
}

#[test]
fn test_patch_requires_generated_bindings() {
    let temp_dir = TempDir::new().unwrap();

    wasmbuild()
        .args(["patch", "--root"])
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("run `wasmbuild build` first"));
}
