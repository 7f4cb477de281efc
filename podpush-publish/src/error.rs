//! Error types for podpush-publish.

use std::path::PathBuf;

use thiserror::Error;

use podpush_core::SpecError;
use podpush_vcs::VcsError;

/// Every way a publish run can stop. None of them are retried.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The named repo has no checkout under the repos root.
    #[error("`{repo}' repo not found in {repos_dir}")]
    RepoNotFound { repo: String, repos_dir: PathBuf },

    /// The working directory holds no `*.podspec` file.
    #[error("couldn't find .podspec file in {dir}")]
    NoSpecFiles { dir: PathBuf },

    /// At least one spec failed validation.
    #[error("all specs must pass validation before push (failed: {})", display_paths(.failed))]
    ValidationFailed { failed: Vec<PathBuf> },

    /// `status` reported pending changes in the checkout.
    #[error("`{repo}' repo not clean")]
    RepoNotClean { repo: String, status: String },

    /// A spec could not be parsed during ingestion.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A version-control command failed.
    #[error("version control error: {0}")]
    Vcs(#[from] VcsError),

    /// A filesystem operation failed, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .unwrap_or(p.as_os_str())
                .to_string_lossy()
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience constructor for [`PublishError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PublishError {
    PublishError::Io {
        path: path.into(),
        source,
    }
}
