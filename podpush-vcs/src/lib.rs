//! # podpush-vcs
//!
//! The version-control seam used by the publish pipeline.
//!
//! Every operation takes the checkout directory explicitly; implementations
//! must not touch the process working directory. [`GitCli`] is the production
//! implementation; tests substitute a recording fake.

use std::path::Path;

pub mod error;
pub mod git;

pub use error::VcsError;
pub use git::GitCli;

/// Version-control operations on one local checkout.
pub trait Vcs {
    /// Porcelain status; empty means the checkout has no pending changes.
    fn status(&self, dir: &Path) -> Result<String, VcsError>;

    /// Fetch and merge the remote; returns the command's output.
    fn pull(&self, dir: &Path) -> Result<String, VcsError>;

    /// Stage `path` (relative to `dir`).
    fn add(&self, dir: &Path, path: &Path) -> Result<(), VcsError>;

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError>;

    /// Push local commits to the remote; returns the command's output.
    fn push(&self, dir: &Path) -> Result<String, VcsError>;
}

impl<T: Vcs + ?Sized> Vcs for &T {
    fn status(&self, dir: &Path) -> Result<String, VcsError> {
        (**self).status(dir)
    }

    fn pull(&self, dir: &Path) -> Result<String, VcsError> {
        (**self).pull(dir)
    }

    fn add(&self, dir: &Path, path: &Path) -> Result<(), VcsError> {
        (**self).add(dir, path)
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        (**self).commit(dir, message)
    }

    fn push(&self, dir: &Path) -> Result<String, VcsError> {
        (**self).push(dir)
    }
}
