//! Error types for podpush-vcs.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a version-control operation.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The program could not be started at all.
    #[error("failed to run `{command}` in {dir}: {source}")]
    Spawn {
        command: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("`{command}` failed in {dir} ({status}){}", last_line_suffix(.output))]
    Failed {
        command: String,
        dir: PathBuf,
        status: String,
        /// Everything the command printed, stdout followed by stderr.
        output: String,
    },
}

impl VcsError {
    /// The failed command's own output, when it printed anything.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } if !output.trim().is_empty() => Some(output),
            _ => None,
        }
    }
}

fn last_line_suffix(output: &str) -> String {
    match output.lines().rev().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => format!(": {line}"),
        None => String::new(),
    }
}
