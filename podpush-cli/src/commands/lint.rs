//! `podpush lint`: validate the specs in the current directory only.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use podpush_lint::Linter;
use podpush_publish::pipeline;

use crate::console::print_lint_report;

/// Arguments for `podpush lint`.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Only print files that fail.
    #[arg(long, short = 's', conflicts_with = "json")]
    pub silent: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl LintArgs {
    pub fn run(self) -> Result<()> {
        let work_dir = std::env::current_dir().context("could not determine current directory")?;
        let report = pipeline::lint(&work_dir, &Linter)?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize lint JSON")?
            );
        } else {
            for r in report.reports.iter().filter(|r| !self.silent || !r.passed()) {
                print_lint_report(r);
            }
        }

        let failed = report.failed().len();
        if failed > 0 {
            bail!(
                "{failed} of {} spec(s) failed validation",
                report.reports.len()
            );
        }
        if !self.json && !self.silent {
            println!();
            println!("{}", "All specs passed validation.".green());
        }
        Ok(())
    }
}
