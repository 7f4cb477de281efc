//! Locating the target checkout and the spec files to publish.

use std::path::{Path, PathBuf};

use podpush_core::SPEC_EXTENSION;

use crate::error::{io_err, PublishError};

/// `<repos_dir>/<repo>`, which must already exist as a directory.
///
/// Names that are empty or would escape `repos_dir` are reported as not found.
pub fn resolve_repo_dir(repos_dir: &Path, repo: &str) -> Result<PathBuf, PublishError> {
    let not_found = || PublishError::RepoNotFound {
        repo: repo.to_string(),
        repos_dir: repos_dir.to_path_buf(),
    };

    if repo.is_empty() || repo == "." || repo == ".." || repo.contains(['/', '\\']) {
        return Err(not_found());
    }
    let dir = repos_dir.join(repo);
    if !dir.is_dir() {
        return Err(not_found());
    }
    Ok(dir)
}

/// Every `*.podspec` file directly inside `dir` (symlinks followed), sorted by
/// file name.
///
/// Sorting makes commit order independent of the filesystem's listing order.
pub fn find_spec_files(dir: &Path) -> Result<Vec<PathBuf>, PublishError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == SPEC_EXTENSION) && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        return Err(PublishError::NoSpecFiles {
            dir: dir.to_path_buf(),
        });
    }
    Ok(files)
}
