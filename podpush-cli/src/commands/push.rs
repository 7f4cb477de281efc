//! `podpush push <REPO>`: validate, update, add, and push.

use anyhow::{Context, Result};
use clap::Args;

use podpush_core::Config;
use podpush_lint::Linter;
use podpush_publish::{PublishOptions, Publisher};
use podpush_vcs::GitCli;

use crate::console::ConsoleReporter;

/// Arguments for `podpush push`.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Name of the spec repo (a checkout under the repos directory).
    pub repo: String,

    /// Only show the output of `git pull` and `git push`.
    #[arg(long, short = 's')]
    pub silent: bool,
}

impl PushArgs {
    pub fn run(self) -> Result<()> {
        let config = Config::load().context("failed to load configuration")?;
        let work_dir = std::env::current_dir().context("could not determine current directory")?;

        let publisher = Publisher::new(
            config.repos_dir,
            work_dir,
            GitCli::new(config.git_program),
            Linter,
            PublishOptions {
                silent: self.silent,
            },
        );
        let summary = publisher.run(&self.repo, &mut ConsoleReporter)?;

        log::debug!(
            "published {} spec(s) to '{}'",
            summary.records.len(),
            summary.repo
        );
        Ok(())
    }
}
