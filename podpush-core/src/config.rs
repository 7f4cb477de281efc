//! User configuration.
//!
//! # Resolution order
//!
//! 1. Defaults: repos under `<home>/.cocoapods/repos`, `git` from `$PATH`.
//! 2. `<home>/.podpush/config.yaml`, if present.
//! 3. `PODPUSH_REPOS_DIR` / `PODPUSH_GIT` environment variables.
//!
//! Like the rest of the crate, [`Config::load_at`] takes an explicit home so
//! tests can point it at a `TempDir`; [`Config::load`] derives it from
//! `dirs::home_dir()`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const REPOS_DIR_ENV: &str = "PODPUSH_REPOS_DIR";
pub const GIT_ENV: &str = "PODPUSH_GIT";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one local checkout per spec repo.
    pub repos_dir: PathBuf,
    /// Program used for version-control commands.
    pub git_program: String,
}

/// On-disk shape of `config.yaml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    repos_dir: Option<PathBuf>,
    git_program: Option<String>,
}

impl Config {
    /// `<home>/.podpush/config.yaml`: pure, no I/O.
    pub fn path_at(home: &Path) -> PathBuf {
        home.join(".podpush").join("config.yaml")
    }

    /// Built-in defaults for `home`.
    pub fn defaults_at(home: &Path) -> Self {
        Self {
            repos_dir: home.join(".cocoapods").join("repos"),
            git_program: "git".to_string(),
        }
    }

    /// Resolve configuration for an explicit home, reading the process environment.
    pub fn load_at(home: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(home, |key| std::env::var(key).ok())
    }

    /// `load_at` convenience wrapper.
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Self::load_at(&home)
    }

    /// Resolve configuration with an injectable environment lookup.
    pub fn load_with_env(
        home: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::defaults_at(home);

        let path = Self::path_at(home);
        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            // An empty file deserializes to `()`; treat it as "no overrides".
            let file: ConfigFile = if contents.trim().is_empty() {
                ConfigFile::default()
            } else {
                serde_yaml::from_str(&contents)
                    .map_err(|source| ConfigError::Parse { path, source })?
            };
            if let Some(dir) = file.repos_dir {
                config.repos_dir = expand_home(home, dir);
            }
            if let Some(git) = file.git_program {
                config.git_program = git;
            }
        }

        if let Some(dir) = env(REPOS_DIR_ENV).filter(|v| !v.is_empty()) {
            config.repos_dir = expand_home(home, PathBuf::from(dir));
        }
        if let Some(git) = env(GIT_ENV).filter(|v| !v.is_empty()) {
            config.git_program = git;
        }

        Ok(config)
    }
}

/// Expand a leading `~` against `home`.
fn expand_home(home: &Path, path: PathBuf) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
