//! Copying specs into a repo checkout and committing them.
//!
//! ## `ingest_spec`: per-file protocol
//!
//! 1. Parse the podspec for its name and version.
//! 2. Classify against the repo as it is *now* (before this file is written).
//! 3. Create `<repo>/<name>/<version>/`.
//! 4. Copy to `<name>.podspec.podpush.tmp`, then rename over `<name>.podspec`.
//! 5. Stage `<name>` and commit `"[<classification>] <name> (<version>)"`.
//!
//! Specs are processed one at a time so a second version of the same pod in
//! the same run sees the directory the first one created.

use std::path::{Path, PathBuf};

use podpush_core::{Classification, Podspec, SpecId};
use podpush_vcs::Vcs;

use crate::error::{io_err, PublishError};

/// What publishing one spec file does (or did) to the repo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRecord {
    pub spec: SpecId,
    /// The local spec file.
    pub source: PathBuf,
    /// `<repo>/<name>/<version>/`
    pub destination: PathBuf,
    pub classification: Classification,
}

impl PublishRecord {
    /// Compute the record for `spec` against the current contents of `repo_dir`.
    pub fn plan(repo_dir: &Path, spec: &Podspec) -> Self {
        Self {
            spec: spec.id.clone(),
            source: spec.path.clone(),
            destination: spec.id.version_dir(repo_dir),
            classification: Classification::of(&spec.id, repo_dir),
        }
    }

    /// Final path of the copied spec.
    pub fn destination_file(&self) -> PathBuf {
        self.destination.join(self.spec.file_name())
    }

    pub fn commit_message(&self) -> String {
        self.classification.commit_message(&self.spec)
    }
}

/// Publish a single spec file into `repo_dir`: classify, copy, add, commit.
pub fn ingest_spec<V: Vcs>(
    vcs: &V,
    repo_dir: &Path,
    spec_file: &Path,
) -> Result<PublishRecord, PublishError> {
    let spec = Podspec::from_file(spec_file)?;
    let record = PublishRecord::plan(repo_dir, &spec);

    std::fs::create_dir_all(&record.destination).map_err(|e| io_err(&record.destination, e))?;
    copy_over(spec_file, &record.destination_file())?;
    tracing::info!(
        "copied {} -> {}",
        spec_file.display(),
        record.destination_file().display()
    );

    vcs.add(repo_dir, Path::new(record.spec.name.as_str()))?;
    vcs.commit(repo_dir, &record.commit_message())?;
    tracing::info!("committed: {}", record.commit_message());

    Ok(record)
}

/// Copy `from` onto `to`, replacing any existing file via a same-directory rename.
fn copy_over(from: &Path, to: &Path) -> Result<(), PublishError> {
    let tmp = PathBuf::from(format!("{}.podpush.tmp", to.display()));
    copy_over_with_tmp(from, to, &tmp)
}

fn copy_over_with_tmp(from: &Path, to: &Path, tmp: &Path) -> Result<(), PublishError> {
    if let Err(e) = std::fs::copy(from, tmp) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(from, e));
    }
    if let Err(e) = std::fs::rename(tmp, to) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(to, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
