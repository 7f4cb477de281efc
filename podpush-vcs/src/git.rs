//! `git` command-line implementation of [`Vcs`].

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use crate::{Vcs, VcsError};

/// Runs the `git` binary with `current_dir` set per call.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    /// Use `program` (a name on `$PATH` or an absolute path) as git.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run<I, S>(&self, dir: &Path, args: I) -> Result<Output, VcsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command = std::iter::once(self.program.clone())
            .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!("running `{command}` in {}", dir.display());

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .output()
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                dir: dir.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                dir: dir.to_path_buf(),
                status: output.status.to_string(),
                output: combined(&output),
            });
        }
        Ok(output)
    }
}

/// stdout followed by stderr; git writes pull/push progress to stderr.
fn combined(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&stderr);
    }
    text
}

impl Vcs for GitCli {
    fn status(&self, dir: &Path) -> Result<String, VcsError> {
        let output = self.run(dir, ["status", "--porcelain"])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn pull(&self, dir: &Path) -> Result<String, VcsError> {
        self.run(dir, ["pull"]).map(|o| combined(&o))
    }

    fn add(&self, dir: &Path, path: &Path) -> Result<(), VcsError> {
        self.run(dir, [OsStr::new("add"), OsStr::new("--"), path.as_os_str()])
            .map(|_| ())
    }

    /// Re-publishing a byte-identical spec stages nothing, but still gets its
    /// own history entry.
    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        self.run(dir, ["commit", "--allow-empty", "-m", message])
            .map(|_| ())
    }

    fn push(&self, dir: &Path) -> Result<String, VcsError> {
        self.run(dir, ["push"]).map(|o| combined(&o))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
