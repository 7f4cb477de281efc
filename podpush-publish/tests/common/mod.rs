//! Fakes shared by the pipeline tests: no git process is ever spawned.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use podpush_lint::{LintIssue, LintReport, SpecValidator, ValidationReport};
use podpush_vcs::{Vcs, VcsError};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Version control
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status,
    Pull,
    Add(PathBuf),
    Commit(String),
    Push,
}

/// Records every call; `status` output and one failing operation are configurable.
#[derive(Debug, Default)]
pub struct RecordingVcs {
    pub calls: RefCell<Vec<Call>>,
    pub status: String,
    pub fail_on: Option<&'static str>,
}

impl RecordingVcs {
    pub fn dirty(status: &str) -> Self {
        Self {
            status: status.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(op: &'static str) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn commits(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Commit(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: &'static str, dir: &Path, call: Call) -> Result<(), VcsError> {
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(op) {
            return Err(VcsError::Failed {
                command: format!("git {op}"),
                dir: dir.to_path_buf(),
                status: "exit status: 1".to_string(),
                output: format!(" ! [rejected] {op} refused by remote\nfatal: {op} rejected\n"),
            });
        }
        Ok(())
    }
}

impl Vcs for RecordingVcs {
    fn status(&self, dir: &Path) -> Result<String, VcsError> {
        self.record("status", dir, Call::Status)?;
        Ok(self.status.clone())
    }

    fn pull(&self, dir: &Path) -> Result<String, VcsError> {
        self.record("pull", dir, Call::Pull)?;
        Ok("Already up to date.\n".to_string())
    }

    fn add(&self, dir: &Path, path: &Path) -> Result<(), VcsError> {
        self.record("add", dir, Call::Add(path.to_path_buf()))
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        self.record("commit", dir, Call::Commit(message.to_string()))
    }

    fn push(&self, dir: &Path) -> Result<String, VcsError> {
        self.record("push", dir, Call::Push)?;
        Ok("To example.com:specs.git\n".to_string())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Passes or fails every file, counting invocations.
#[derive(Debug, Default)]
pub struct FixedValidator {
    pub reject: Vec<&'static str>,
    pub invocations: Cell<usize>,
}

impl FixedValidator {
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn rejecting(file_names: &[&'static str]) -> Self {
        Self {
            reject: file_names.to_vec(),
            ..Self::default()
        }
    }
}

impl SpecValidator for FixedValidator {
    fn validate(&self, files: &[PathBuf]) -> ValidationReport {
        self.invocations.set(self.invocations.get() + 1);
        let reports = files
            .iter()
            .map(|path| {
                let name = path.file_name().unwrap().to_string_lossy();
                let errors = if self.reject.iter().any(|r| *r == name) {
                    vec![LintIssue {
                        attribute: None,
                        message: "rejected".to_string(),
                    }]
                } else {
                    vec![]
                };
                LintReport {
                    path: path.clone(),
                    spec: None,
                    errors,
                    warnings: vec![],
                }
            })
            .collect();
        ValidationReport { reports }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A working directory with spec files and a repos root holding `master/`.
pub struct Fixture {
    pub work: TempDir,
    pub repos: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            work: TempDir::new().expect("work dir"),
            repos: TempDir::new().expect("repos dir"),
        };
        fs::create_dir_all(fixture.repo_dir()).expect("mkdir repo");
        fixture
    }

    pub fn repo_dir(&self) -> PathBuf {
        self.repos.path().join("master")
    }

    /// Write `<file_name>` with the given identity into the working directory.
    pub fn spec(&self, file_name: &str, name: &str, version: &str) -> PathBuf {
        let path = self.work.path().join(file_name);
        fs::write(&path, podspec(name, version)).expect("write spec");
        path
    }

    /// Pre-populate `<repo>/<rel>` as a directory.
    pub fn existing(&self, rel: &str) -> PathBuf {
        let dir = self.repo_dir().join(rel);
        fs::create_dir_all(&dir).expect("mkdir existing");
        dir
    }
}

/// A podspec that passes the built-in linter.
pub fn podspec(name: &str, version: &str) -> String {
    format!(
        "Pod::Spec.new do |s|\n  s.name     = '{name}'\n  s.version  = '{version}'\n  s.summary  = '{name} pod.'\n  s.homepage = 'https://example.com/{name}'\n  s.source   = {{ :git => 'https://example.com/{name}.git', :tag => s.version.to_s }}\n  s.authors  = {{ 'Jane' => 'jane@example.com' }}\n  s.license  = 'MIT'\nend\n"
    )
}
