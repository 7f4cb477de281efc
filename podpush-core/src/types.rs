//! Domain types for published specs.
//!
//! `SpecName` and `SpecVersion` become directory names inside a spec repo, so
//! both are only constructed through [`SpecName::parse`] / [`SpecVersion::parse`]
//! which reject anything that could escape `<repo>/<name>/<version>/`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed pod name (`s.name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpecName(String);

impl SpecName {
    /// Validate `raw` as a path component.
    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        check_component(raw).map(|()| Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A strongly-typed pod version (`s.version`), kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpecVersion(String);

impl SpecVersion {
    /// Validate `raw` as a path component.
    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        check_component(raw).map(|()| Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn check_component(raw: &str) -> Result<(), &'static str> {
    if raw.is_empty() {
        return Err("must not be empty");
    }
    if raw == "." || raw == ".." {
        return Err("must not be `.` or `..`");
    }
    if raw.contains(['/', '\\']) {
        return Err("must not contain path separators");
    }
    if raw.chars().any(char::is_whitespace) {
        return Err("must not contain whitespace");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SpecId
// ---------------------------------------------------------------------------

/// Identity of one published pod version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecId {
    pub name: SpecName,
    pub version: SpecVersion,
}

impl SpecId {
    /// `<repo>/<name>/`
    pub fn name_dir(&self, repo_dir: &Path) -> PathBuf {
        repo_dir.join(self.name.as_str())
    }

    /// `<repo>/<name>/<version>/`
    pub fn version_dir(&self, repo_dir: &Path) -> PathBuf {
        self.name_dir(repo_dir).join(self.version.as_str())
    }

    /// File name the spec is stored under inside its version directory.
    pub fn file_name(&self) -> String {
        format!("{}.podspec", self.name)
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// How a spec relates to what the repo already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// `<name>/` does not exist yet.
    Add,
    /// `<name>/` exists but `<name>/<version>/` does not.
    Update,
    /// `<name>/<version>/` already exists; the spec is being re-published.
    Fix,
}

impl Classification {
    /// Classify `spec` against the current contents of `repo_dir`.
    pub fn of(spec: &SpecId, repo_dir: &Path) -> Self {
        if spec.version_dir(repo_dir).exists() {
            Classification::Fix
        } else if spec.name_dir(repo_dir).exists() {
            Classification::Update
        } else {
            Classification::Add
        }
    }

    /// Commit message for publishing `spec` under this classification.
    pub fn commit_message(self, spec: &SpecId) -> String {
        format!("[{self}] {spec}")
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Add => write!(f, "Add"),
            Classification::Update => write!(f, "Update"),
            Classification::Fix => write!(f, "Fix"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
