//! # podpush-publish
//!
//! The publish pipeline for spec repos.
//!
//! Build a [`Publisher`] with a [`Vcs`](podpush_vcs::Vcs) and a
//! [`SpecValidator`](podpush_lint::SpecValidator), then call
//! [`Publisher::run`] with the repo name. Progress is delivered to a
//! [`Reporter`] as [`PublishEvent`]s.

pub mod discover;
pub mod error;
pub mod event;
pub mod ingest;
pub mod pipeline;

pub use error::PublishError;
pub use event::{PublishEvent, Reporter, Stage};
pub use ingest::{ingest_spec, PublishRecord};
pub use pipeline::{is_clean, PublishOptions, PublishSummary, Publisher};
