use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_quaerendo(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("config.toml");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quaerendo"));
    cmd.current_dir(dir)
        .arg("--no-color")
        .arg("--config")
        .arg(&config)
        .args(args);
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("run quaerendo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_profile_set_and_list() {
    let tmp = TempDir::new().expect("tmpdir");

    // Nothing listens on this address; profile commands must not connect
    let set = run_quaerendo(tmp.path(), &["profile", "set", "staging", "-u", "http://127.0.0.1:9"]);
    assert!(
        set.status.success(),
        "profile set failed: {}",
        String::from_utf8_lossy(&set.stderr)
    );
    assert!(tmp.path().join("config.toml").exists());

    let list = run_quaerendo(tmp.path(), &["profile", "list"]);
    assert!(list.status.success());
    let out = stdout(&list);
    assert!(out.contains("staging"));
    assert!(out.contains("http://127.0.0.1:9"));
    assert!(out.contains("* ✓ default"));
}

#[test]
fn test_whoami_reads_stored_token() {
    let tmp = TempDir::new().expect("tmpdir");

    let anonymous = run_quaerendo(tmp.path(), &["whoami"]);
    assert!(anonymous.status.success());
    assert!(stdout(&anonymous).contains("Not logged in"));

    fs::write(tmp.path().join("storage.json"), r#"{"token": "abc123"}"#).expect("write storage");
    let authenticated = run_quaerendo(tmp.path(), &["whoami"]);
    assert!(authenticated.status.success());
    let out = stdout(&authenticated);
    assert!(out.contains("Authenticated (abc1…)"));
    assert!(out.contains("http://localhost:8000"));
}

#[test]
fn test_unknown_profile_fails() {
    let tmp = TempDir::new().expect("tmpdir");

    let output = run_quaerendo(tmp.path(), &["--profile", "missing", "profile", "show"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Profile 'missing' does not exist"));
}
