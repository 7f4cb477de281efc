//! Error types for podpush-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a podspec.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mandatory attribute (`name`, `version`) is not assigned.
    #[error("{path}: missing `{attribute}` attribute")]
    MissingAttribute {
        path: PathBuf,
        attribute: &'static str,
    },

    /// An attribute is assigned but its value cannot be used.
    #[error("{path}: invalid `{attribute}` value '{value}': {reason}")]
    InvalidAttribute {
        path: PathBuf,
        attribute: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Errors raised while loading `~/.podpush/config.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error; includes the file path and serde_yaml's line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
