use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs::{self, File};
use tempfile::TempDir;

fn cmd(settings_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("smenu").unwrap();
    // Never pick up the developer's own settings file
    cmd.arg("--settings-path")
        .arg(settings_dir.path().join("settings.yml"))
        .arg("--no-clear");
    cmd
}

fn script_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("Storage")).unwrap();
    File::create(temp_dir.path().join("Ping.sh")).unwrap();
    File::create(temp_dir.path().join("README.md")).unwrap();
    temp_dir
}

#[test]
fn lists_root_and_exits() {
    let settings_dir = TempDir::new().unwrap();
    let tree = script_tree();

    cmd(&settings_dir)
        .arg(tree.path())
        .write_stdin("e\n")
        .assert()
        .success()
        .stdout(contains("Storage/"))
        .stdout(contains("2) Ping.sh"))
        .stdout(contains("README.md").not());
}

#[test]
fn back_at_root_exits_successfully() {
    let settings_dir = TempDir::new().unwrap();
    let tree = script_tree();

    cmd(&settings_dir)
        .arg(tree.path())
        .write_stdin("1\nb\nb\n")
        .assert()
        .success()
        .stdout(contains("Current directory: Storage/"));
}

#[test]
fn extension_comes_from_settings_file() {
    let settings_dir = TempDir::new().unwrap();
    let tree = script_tree();
    fs::write(settings_dir.path().join("settings.yml"), "extension: md\n").unwrap();

    cmd(&settings_dir)
        .arg(tree.path())
        .write_stdin("e\n")
        .assert()
        .success()
        .stdout(contains("README.md"))
        .stdout(contains("Ping.sh").not());
}

#[test]
fn missing_root_fails() {
    let settings_dir = TempDir::new().unwrap();

    cmd(&settings_dir)
        .arg("/this/path/does/not/exist")
        .write_stdin("e\n")
        .assert()
        .failure()
        .stderr(contains("does not exist"));
}

#[test]
fn malformed_settings_fail() {
    let settings_dir = TempDir::new().unwrap();
    let tree = script_tree();
    fs::write(settings_dir.path().join("settings.yml"), "root: [unterminated\n").unwrap();

    cmd(&settings_dir)
        .arg(tree.path())
        .write_stdin("e\n")
        .assert()
        .failure()
        .stderr(contains("settings"));
}

#[test]
fn unknown_capture_backend_fails() {
    let settings_dir = TempDir::new().unwrap();
    let tree = script_tree();

    cmd(&settings_dir)
        .arg(tree.path())
        .args(["--capture", "tmux"])
        .write_stdin("e\n")
        .assert()
        .failure()
        .stderr(contains("Unknown capture backend"));
}
