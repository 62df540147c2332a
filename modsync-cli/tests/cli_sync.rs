//! End-to-end tests for the `modsync` binary. None of them reach the network.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn modsync(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modsync").expect("binary");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_manifest(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("mods.json");
    fs::write(&path, body).unwrap();
    path
}

// ---------------------------------------------------------------------------
// hash
// ---------------------------------------------------------------------------

#[test]
fn hash_defaults_to_sha1() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("abc.jar");
    fs::write(&file, "abc").unwrap();

    modsync(home.path())
        .args(["hash"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "a9993e364706816aba3e25717850c26c9cd0d89d",
        ));
}

#[test]
fn hash_accepts_md5() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("abc.jar");
    fs::write(&file, "abc").unwrap();

    modsync(home.path())
        .args(["hash", "--algorithm", "md5"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("900150983cd24fb0d6963f7d28e17f72"));
}

#[test]
fn hash_rejects_unknown_algorithm() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("abc.jar");
    fs::write(&file, "abc").unwrap();

    modsync(home.path())
        .args(["hash", "-a", "crc32"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown hash algorithm"));
}

// ---------------------------------------------------------------------------
// sync
// ---------------------------------------------------------------------------

#[test]
fn empty_manifest_with_remove_unlisted_clears_directory() {
    let home = TempDir::new().unwrap();
    let mods = home.path().join("mods");
    fs::create_dir_all(&mods).unwrap();
    fs::write(mods.join("old.jar"), "old").unwrap();
    let manifest = write_manifest(home.path(), r#"{"mods":{}}"#);

    modsync(home.path())
        .args(["sync", "--remove-unlisted", "--dir"])
        .arg(&mods)
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 removed"));

    assert!(!mods.join("old.jar").exists());
}

#[test]
fn json_output_lists_removed_files() {
    let home = TempDir::new().unwrap();
    let mods = home.path().join("mods");
    fs::create_dir_all(&mods).unwrap();
    fs::write(mods.join("old.jar"), "old").unwrap();
    let manifest = write_manifest(home.path(), r#"{"mods":{}}"#);

    let output = modsync(home.path())
        .args(["sync", "--remove-unlisted", "--json", "--dir"])
        .arg(&mods)
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["sync"]["removed"], serde_json::json!(["old.jar"]));
    assert_eq!(value["ingest"]["added"], 0);
}

#[test]
fn sync_creates_missing_directory() {
    let home = TempDir::new().unwrap();
    let mods = home.path().join(".minecraft").join("mods");
    let manifest = write_manifest(home.path(), r#"{"mods":{}}"#);

    modsync(home.path())
        .arg("sync")
        .arg("--dir")
        .arg(&mods)
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success();

    assert!(mods.is_dir());
}

#[test]
fn malformed_entry_makes_the_run_fail() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.yaml");
    fs::write(
        &config,
        "providers:\n  curseforge_endpoint: http://127.0.0.1:9\n  modrinth_endpoint: http://127.0.0.1:9\n",
    )
    .unwrap();
    let mods = home.path().join("mods");
    let manifest = write_manifest(home.path(), r#"{"mods":{"modrinth":[{}]}}"#);

    modsync(home.path())
        .arg("--config")
        .arg(&config)
        .arg("sync")
        .arg("--dir")
        .arg(&mods)
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("modrinth[0]"));
}

#[test]
fn missing_manifest_file_fails() {
    let home = TempDir::new().unwrap();

    modsync(home.path())
        .args(["sync", "--dir"])
        .arg(home.path().join("mods"))
        .arg("--manifest")
        .arg(home.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn manifest_source_is_required() {
    let home = TempDir::new().unwrap();

    modsync(home.path())
        .args(["sync", "--dir"])
        .arg(home.path().join("mods"))
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_rejects_malformed_pair() {
    let home = TempDir::new().unwrap();

    modsync(home.path())
        .args(["resolve", "modrinth", "versionId"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key=value"));
}

#[test]
fn resolve_unknown_provider_fails() {
    let home = TempDir::new().unwrap();

    modsync(home.path())
        .args(["resolve", "nexus", "id=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nexus"));
}
