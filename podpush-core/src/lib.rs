//! podpush core library: domain types, podspec reading, configuration, errors.
//!
//! - [`types`]: spec identity newtypes and [`Classification`]
//! - [`podspec`]: attribute extraction from `*.podspec` files
//! - [`config`]: repos root and git program resolution
//! - [`error`]: [`SpecError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod podspec;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, SpecError};
pub use podspec::{Podspec, SPEC_EXTENSION};
pub use types::{Classification, SpecId, SpecName, SpecVersion};
