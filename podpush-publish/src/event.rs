//! Progress events emitted by the publish pipeline.

use std::fmt;

use podpush_lint::LintReport;

use crate::ingest::PublishRecord;

/// The pipeline stages that announce themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    Update,
    Add,
    Push,
}

impl Stage {
    /// Heading shown when the stage starts.
    pub fn heading(self, repo: &str) -> String {
        match self {
            Stage::Validate => "Validating specs".to_string(),
            Stage::Update => format!("Updating the `{repo}' repo"),
            Stage::Add => format!("Adding the specs to the `{repo}' repo"),
            Stage::Push => format!("Pushing the `{repo}' repo"),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Validate => write!(f, "validate"),
            Stage::Update => write!(f, "update"),
            Stage::Add => write!(f, "add"),
            Stage::Push => write!(f, "push"),
        }
    }
}

/// Something the operator may want to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    /// A stage is starting.
    Stage { stage: Stage, repo: String },
    /// Validation result for one spec file.
    Linted(LintReport),
    /// A spec was copied into the repo and committed.
    Added(PublishRecord),
    /// Raw output of the pull or push command.
    RemoteOutput { stage: Stage, output: String },
}

impl PublishEvent {
    /// Essential events are delivered even in silent mode.
    pub fn is_essential(&self) -> bool {
        matches!(self, PublishEvent::RemoteOutput { .. })
    }
}

/// Receives pipeline events in order.
pub trait Reporter {
    fn report(&mut self, event: PublishEvent);
}

/// Collects events; handy for tests and for callers that render afterwards.
impl Reporter for Vec<PublishEvent> {
    fn report(&mut self, event: PublishEvent) {
        self.push(event);
    }
}
