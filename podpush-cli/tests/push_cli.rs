//! Binary-level behaviour of `podpush push` / `podpush lint`.
//!
//! Every test isolates HOME and the repos directory in temp dirs. The one
//! end-to-end publish test needs `git` and skips itself otherwise.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    home: TempDir,
    repos: TempDir,
    work: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            home: TempDir::new().expect("home"),
            repos: TempDir::new().expect("repos"),
            work: TempDir::new().expect("work"),
        }
    }

    fn podpush(&self) -> Command {
        let mut cmd = Command::cargo_bin("podpush").expect("podpush binary");
        cmd.current_dir(self.work.path())
            .env("HOME", self.home.path())
            .env("USERPROFILE", self.home.path())
            .env("PODPUSH_REPOS_DIR", self.repos.path())
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0")
            .env_remove("PODPUSH_GIT");
        cmd
    }

    fn spec(&self, name: &str, version: &str) -> PathBuf {
        let path = self.work.path().join(format!("{name}.podspec"));
        fs::write(&path, podspec(name, version)).expect("write spec");
        path
    }
}

fn podspec(name: &str, version: &str) -> String {
    format!(
        "Pod::Spec.new do |s|\n  s.name     = '{name}'\n  s.version  = '{version}'\n  s.summary  = '{name} pod.'\n  s.homepage = 'https://example.com/{name}'\n  s.source   = {{ :git => 'https://example.com/{name}.git', :tag => s.version.to_s }}\n  s.authors  = {{ 'Jane' => 'jane@example.com' }}\n  s.license  = 'MIT'\nend\n"
    )
}

// ---------------------------------------------------------------------------
// Usage errors
// ---------------------------------------------------------------------------

#[test]
fn push_without_repo_is_a_usage_error() {
    let env = Env::new();
    env.podpush().arg("push").assert().code(2);
}

#[test]
fn push_with_two_repos_is_a_usage_error() {
    let env = Env::new();
    env.podpush().args(["push", "master", "extra"]).assert().code(2);
}

// ---------------------------------------------------------------------------
// Aborts before any repo mutation
// ---------------------------------------------------------------------------

#[test]
fn unknown_repo_fails_with_single_error_line() {
    let env = Env::new();
    env.spec("Foo", "1.0");
    env.podpush()
        .args(["push", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[!] `master' repo not found"));
}

#[test]
fn missing_spec_files_fail_before_contacting_repo() {
    let env = Env::new();
    fs::create_dir_all(env.repos.path().join("master")).unwrap();
    env.podpush()
        .args(["push", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("couldn't find .podspec file"));
}

#[test]
fn invalid_spec_blocks_push_and_leaves_repo_untouched() {
    let env = Env::new();
    let repo = env.repos.path().join("master");
    fs::create_dir_all(&repo).unwrap();
    fs::write(
        env.work.path().join("Foo.podspec"),
        "Pod::Spec.new do |s|\n  s.name = 'Foo'\n  s.version = '1.0'\nend\n",
    )
    .unwrap();

    env.podpush()
        .args(["push", "master"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Validating specs"))
        .stdout(predicate::str::contains("[summary] required attribute is missing"))
        .stderr(predicate::str::contains("all specs must pass validation"));
    assert_eq!(fs::read_dir(&repo).unwrap().count(), 0);
}

#[test]
fn config_error_is_reported_once() {
    let env = Env::new();
    env.spec("Foo", "1.0");
    let config_dir = env.home.path().join(".podpush");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yaml"), "bogus: 1\n").unwrap();

    let output = env.podpush().args(["push", "master"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("[!] failed to load configuration"), "{stderr}");
    assert_eq!(stderr.matches("unknown field `bogus`").count(), 1, "{stderr}");
}

/// A git stand-in whose `push` prints to both streams and is rejected.
#[cfg(unix)]
fn rejecting_git(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-git");
    fs::write(
        &script,
        "#!/bin/sh\n\
         if [ \"$1\" = push ]; then\n\
           echo 'To origin'\n\
           echo ' ! [rejected]        master -> master (fetch first)' >&2\n\
           echo 'error: failed to push some refs to origin' >&2\n\
           echo 'hint: Updates were rejected because the remote contains work' >&2\n\
           exit 1\n\
         fi\n\
         exit 0\n",
    )
    .unwrap();
    let mut perms = fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).unwrap();
    script
}

#[cfg(unix)]
#[test]
fn rejected_push_shows_remote_output_and_a_single_error() {
    let env = Env::new();
    env.spec("Foo", "1.0");
    fs::create_dir_all(env.repos.path().join("master")).unwrap();
    let bin = TempDir::new().unwrap();
    let git = rejecting_git(bin.path());

    for silent in [false, true] {
        let mut cmd = env.podpush();
        cmd.env("PODPUSH_GIT", &git).args(["push", "master"]);
        if silent {
            cmd.arg("--silent");
        }
        let output = cmd.output().unwrap();
        assert_eq!(output.status.code(), Some(1));

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("To origin"), "{stdout}");
        assert!(stdout.contains("[rejected]"), "{stdout}");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(stderr.lines().count(), 1, "{stderr}");
        assert_eq!(stderr.matches("push` failed in").count(), 1, "{stderr}");
        assert!(stderr.contains("hint: Updates were rejected"), "{stderr}");
    }
}

// ---------------------------------------------------------------------------
// lint
// ---------------------------------------------------------------------------

#[test]
fn lint_passes_valid_specs() {
    let env = Env::new();
    env.spec("Foo", "1.0");
    env.podpush()
        .arg("lint")
        .assert()
        .success()
        .stdout(predicate::str::contains("Foo (1.0)"))
        .stdout(predicate::str::contains("All specs passed validation."));
}

#[test]
fn lint_json_reports_each_file() {
    let env = Env::new();
    env.spec("Foo", "1.0");
    env.spec("Bar", "2.0");
    let output = env.podpush().args(["lint", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let reports = json["reports"].as_array().expect("reports array");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["spec"]["name"], "Bar");
}

#[test]
fn lint_fails_on_bad_version() {
    let env = Env::new();
    env.spec("Foo", "latest");
    env.podpush()
        .arg("lint")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of 1 spec(s) failed validation"));
}

// ---------------------------------------------------------------------------
// End to end with real git
// ---------------------------------------------------------------------------

fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, home: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .env("HOME", home)
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn publishes_new_spec_and_pushes_to_remote() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }
    let env = Env::new();
    let home = env.home.path();
    let remote_root = TempDir::new().unwrap();
    let remote = remote_root.path().join("specs.git");
    fs::create_dir_all(&remote).unwrap();
    git(&remote, home, &["init", "--bare", "--quiet"]);

    // Seed the remote so `pull` has something to track.
    git(remote_root.path(), home, &["clone", "--quiet", "specs.git", "seed"]);
    let seed = remote_root.path().join("seed");
    git(&seed, home, &["config", "user.name", "seed"]);
    git(&seed, home, &["config", "user.email", "seed@podpush.invalid"]);
    fs::write(seed.join("README.md"), "specs\n").unwrap();
    git(&seed, home, &["add", "README.md"]);
    git(&seed, home, &["commit", "--quiet", "-m", "init"]);
    git(&seed, home, &["push", "--quiet", "-u", "origin", "HEAD"]);

    let remote_url = remote.to_string_lossy().into_owned();
    git(env.repos.path(), home, &["clone", "--quiet", &remote_url, "master"]);
    let checkout = env.repos.path().join("master");
    git(&checkout, home, &["config", "user.name", "podpush tests"]);
    git(&checkout, home, &["config", "user.email", "tests@podpush.invalid"]);
    git(&checkout, home, &["config", "commit.gpgsign", "false"]);

    env.spec("Foo", "1.0");
    env.podpush()
        .args(["push", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updating the `master' repo"))
        .stdout(predicate::str::contains(" - [Add] Foo (1.0)"))
        .stdout(predicate::str::contains("Pushing the `master' repo"));

    assert!(checkout.join("Foo/1.0/Foo.podspec").is_file());
    let subject = git(&remote, home, &["log", "-1", "--format=%s"]);
    assert_eq!(subject.trim(), "[Add] Foo (1.0)");

    // Republishing the same version is a fix.
    env.podpush().args(["push", "master", "--silent"]).assert().success();
    let subject = git(&remote, home, &["log", "-1", "--format=%s"]);
    assert_eq!(subject.trim(), "[Fix] Foo (1.0)");
}
