#![cfg(unix)]

extern crate tempfile;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A stand-in for `git` which records its arguments and working directory,
/// writes something to both stdout and stderr, then creates the destination.
const FAKE_GIT: &str = r#"#!/bin/sh
echo "$@" > "$SRD_LOG"
pwd >> "$SRD_LOG"
echo "Cloning into '$3'..."
echo "remote: progress" >&2
mkdir -p "$3/.git"
"#;

const BROKEN_GIT: &str = r#"#!/bin/sh
echo "fatal: repository not found" >&2
exit 128
"#;

struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new(script: &str) -> Sandbox {
        let temp = tempfile::tempdir().unwrap();

        let git = temp.path().join("fake-git");
        fs::write(&git, script).unwrap();
        fs::set_permissions(&git, fs::Permissions::from_mode(0o755)).unwrap();

        let config = format!("git = {:?}\n", git.to_str().unwrap());
        fs::write(temp.path().join("srd.toml"), config).unwrap();

        Sandbox { temp }
    }

    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn root(&self) -> PathBuf {
        self.path().join("src")
    }

    fn log(&self) -> PathBuf {
        self.path().join("git.log")
    }

    fn srd(&self, locator: &str) -> Output {
        Command::new(env!("CARGO_BIN_EXE_srd"))
            .arg("--config")
            .arg(self.path().join("srd.toml"))
            .arg("--root")
            .arg(self.root())
            .arg(locator)
            .env("HOME", self.path())
            .env("SRD_LOG", self.log())
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

#[test]
fn only_the_path_goes_to_stdout() {
    let sandbox = Sandbox::new(FAKE_GIT);

    let output = sandbox.srd("https://example.com/Bob/Repo");

    assert!(output.status.success());
    let expected = sandbox.root().join("example.com").join("bob").join("repo");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, format!("{}\n", expected.display()));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Cloning into 'repo'..."));
    assert!(stderr.contains("remote: progress"));
}

#[test]
fn git_gets_the_original_casing() {
    let sandbox = Sandbox::new(FAKE_GIT);

    let output = sandbox.srd("https://example.com/~Bob/Repo");
    assert!(output.status.success());

    let log = fs::read_to_string(sandbox.log()).unwrap();
    let mut lines = log.lines();
    assert_eq!(lines.next().unwrap(), "clone https://example.com/~Bob/Repo repo");
    let cwd = fs::canonicalize(lines.next().unwrap()).unwrap();
    let parent = fs::canonicalize(sandbox.root().join("example.com").join("bob")).unwrap();
    assert_eq!(cwd, parent);
}

#[test]
fn running_twice_reuses_the_clone() {
    let sandbox = Sandbox::new(FAKE_GIT);

    let first = sandbox.srd("https://example.com/Bob/Repo");
    fs::remove_file(sandbox.log()).unwrap();
    let second = sandbox.srd("https://example.com/bob/repo");

    assert!(second.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(!sandbox.log().exists());
    let stderr = String::from_utf8(second.stderr).unwrap();
    assert!(stderr.contains("has already been cloned"));
}

#[test]
fn failed_clones_exit_non_zero() {
    let sandbox = Sandbox::new(BROKEN_GIT);

    let output = sandbox.srd("https://example.com/Bob/Repo");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("repository not found"));
    assert!(stderr.contains("https://example.com/Bob/Repo"));
}

#[test]
fn short_urls_exit_non_zero() {
    let sandbox = Sandbox::new(FAKE_GIT);

    let output = sandbox.srd("https://example.com/onlyuser");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("at least a user and a project"));
    assert!(!sandbox.root().exists());
}

#[test]
fn a_locator_is_required() {
    let output = Command::new(env!("CARGO_BIN_EXE_srd"))
        .arg("--root")
        .arg("/nonexistent")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("requires a git URL"));
}

#[test]
fn print_an_example_config() {
    let output = Command::new(env!("CARGO_BIN_EXE_srd"))
        .arg("--example-config")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("root = \"~/src\""));
}
