//! The publish pipeline: validate → ensure clean → pull → add specs → push.
//!
//! Each stage either succeeds or aborts the run with a [`PublishError`]. Nothing
//! touches the repo until both the validation and cleanliness gates pass, and
//! nothing is rolled back: commits made before a failed push stay local.

use std::path::{Path, PathBuf};

use podpush_lint::{SpecValidator, ValidationReport};
use podpush_vcs::{Vcs, VcsError};

use crate::discover::{find_spec_files, resolve_repo_dir};
use crate::error::PublishError;
use crate::event::{PublishEvent, Reporter, Stage};
use crate::ingest::{ingest_spec, PublishRecord};

/// Per-run switches, fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Suppress everything except pull/push output.
    pub silent: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    pub repo: String,
    /// One record per spec, in processing order.
    pub records: Vec<PublishRecord>,
    pub pull_output: String,
    pub push_output: String,
}

/// Publishes the specs found in `work_dir` into a repo under `repos_dir`.
pub struct Publisher<V, L> {
    repos_dir: PathBuf,
    work_dir: PathBuf,
    vcs: V,
    validator: L,
    options: PublishOptions,
}

impl<V: Vcs, L: SpecValidator> Publisher<V, L> {
    pub fn new(
        repos_dir: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
        vcs: V,
        validator: L,
        options: PublishOptions,
    ) -> Self {
        Self {
            repos_dir: repos_dir.into(),
            work_dir: work_dir.into(),
            vcs,
            validator,
            options,
        }
    }

    /// Run every stage for `repo`, stopping at the first failure.
    pub fn run(
        &self,
        repo: &str,
        reporter: &mut dyn Reporter,
    ) -> Result<PublishSummary, PublishError> {
        let repo_dir = resolve_repo_dir(&self.repos_dir, repo)?;
        let spec_files = find_spec_files(&self.work_dir)?;

        self.validate_specs(repo, &spec_files, reporter)?;
        self.check_repo_status(repo, &repo_dir)?;
        let pull_output = self.update_repo(repo, &repo_dir, reporter)?;
        let records = self.add_specs_to_repo(repo, &repo_dir, &spec_files, reporter)?;
        let push_output = self.push_repo(repo, &repo_dir, reporter)?;

        Ok(PublishSummary {
            repo: repo.to_string(),
            records,
            pull_output,
            push_output,
        })
    }

    fn emit(&self, reporter: &mut dyn Reporter, event: PublishEvent) {
        if self.options.silent && !event.is_essential() {
            return;
        }
        reporter.report(event);
    }

    fn stage(&self, reporter: &mut dyn Reporter, stage: Stage, repo: &str) {
        self.emit(
            reporter,
            PublishEvent::Stage {
                stage,
                repo: repo.to_string(),
            },
        );
    }

    fn validate_specs(
        &self,
        repo: &str,
        spec_files: &[PathBuf],
        reporter: &mut dyn Reporter,
    ) -> Result<(), PublishError> {
        self.stage(reporter, Stage::Validate, repo);
        let report = self.validator.validate(spec_files);
        let failed: Vec<PathBuf> = report.failed().into_iter().map(Path::to_path_buf).collect();
        for lint in report.reports {
            self.emit(reporter, PublishEvent::Linted(lint));
        }
        if !failed.is_empty() {
            return Err(PublishError::ValidationFailed { failed });
        }
        Ok(())
    }

    fn check_repo_status(&self, repo: &str, repo_dir: &Path) -> Result<(), PublishError> {
        let status = self.vcs.status(repo_dir)?;
        if !status.is_empty() {
            return Err(PublishError::RepoNotClean {
                repo: repo.to_string(),
                status,
            });
        }
        Ok(())
    }

    fn update_repo(
        &self,
        repo: &str,
        repo_dir: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<String, PublishError> {
        self.stage(reporter, Stage::Update, repo);
        let result = self.vcs.pull(repo_dir);
        self.remote_output(reporter, Stage::Update, result)
    }

    fn add_specs_to_repo(
        &self,
        repo: &str,
        repo_dir: &Path,
        spec_files: &[PathBuf],
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<PublishRecord>, PublishError> {
        self.stage(reporter, Stage::Add, repo);
        let mut records = Vec::with_capacity(spec_files.len());
        for spec_file in spec_files {
            let record = ingest_spec(&self.vcs, repo_dir, spec_file)?;
            self.emit(reporter, PublishEvent::Added(record.clone()));
            records.push(record);
        }
        Ok(records)
    }

    fn push_repo(
        &self,
        repo: &str,
        repo_dir: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<String, PublishError> {
        self.stage(reporter, Stage::Push, repo);
        let result = self.vcs.push(repo_dir);
        self.remote_output(reporter, Stage::Push, result)
    }

    /// Pull and push output reaches the reporter whether or not the command
    /// succeeded.
    fn remote_output(
        &self,
        reporter: &mut dyn Reporter,
        stage: Stage,
        result: Result<String, VcsError>,
    ) -> Result<String, PublishError> {
        let output = match &result {
            Ok(output) => Some(output.clone()),
            Err(err) => err.output().map(str::to_string),
        };
        if let Some(output) = output {
            self.emit(reporter, PublishEvent::RemoteOutput { stage, output });
        }
        Ok(result?)
    }
}

/// `true` when `vcs` reports no pending changes in `repo_dir`.
pub fn is_clean<V: Vcs>(vcs: &V, repo_dir: &Path) -> Result<bool, PublishError> {
    Ok(vcs.status(repo_dir)?.is_empty())
}

/// Validate the specs in `work_dir` without touching any repo.
pub fn lint<L: SpecValidator>(
    work_dir: &Path,
    validator: &L,
) -> Result<ValidationReport, PublishError> {
    let spec_files = find_spec_files(work_dir)?;
    Ok(validator.validate(&spec_files))
}
