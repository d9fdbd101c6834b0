//! Runs the `hbnb` binary against scripted input.

use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn run_script(dir: &Path, script: impl AsRef<[u8]>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hbnb"))
        .arg("--script")
        .arg("-")
        .arg("--log-stderr")
        .arg("--config")
        .arg(dir.join("absent.toml"))
        .arg("--file")
        .arg(dir.join("file.json"))
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_ref())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_script_without_prompt() {
    let dir = tempdir().unwrap();
    let output = run_script(dir.path(), "create\ncount User\nquit\n");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "** class name missing **\n0\n"
    );
}

#[test]
fn test_invalid_utf8_line_does_not_end_session() {
    let dir = tempdir().unwrap();
    let output = run_script(dir.path(), b"create \xff\xfe\ncount User\nquit\n");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "** class doesn't exist **\n0\n"
    );
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let dir = tempdir().unwrap();
    let output = run_script(dir.path(), "create User\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout.lines().next().unwrap();
    assert_eq!(id.len(), 36);
    assert!(dir.path().join("file.json").exists());
}

#[test]
fn test_store_shared_between_runs() {
    let dir = tempdir().unwrap();
    run_script(dir.path(), "create Amenity\ncreate Amenity\n");
    let output = run_script(dir.path(), "Amenity.count()\n");

    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n");
}

#[test]
fn test_unreadable_config_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[storage\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_hbnb"))
        .arg("--script")
        .arg("-")
        .arg("--log-stderr")
        .arg("--config")
        .arg(&config)
        .env("RUST_LOG", "off")
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("Configuration Error"));
}
