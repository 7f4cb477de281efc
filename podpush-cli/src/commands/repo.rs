//! `podpush repo list`: local spec repos and whether they can be pushed to.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use podpush_core::Config;
use podpush_publish::is_clean;
use podpush_vcs::GitCli;

/// Inspect local spec repos.
#[derive(Subcommand, Debug)]
pub enum RepoCommand {
    /// List the checkouts under the repos directory.
    List,
}

pub fn run(cmd: RepoCommand) -> Result<()> {
    match cmd {
        RepoCommand::List => list(),
    }
}

#[derive(Tabled)]
struct RepoRow {
    #[tabled(rename = "repo")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "path")]
    path: String,
}

fn list() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let git = GitCli::new(config.git_program.clone());

    if !config.repos_dir.is_dir() {
        println!("No spec repos found in {}.", config.repos_dir.display());
        return Ok(());
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(&config.repos_dir)
        .with_context(|| format!("failed to read {}", config.repos_dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("failed to read {}", config.repos_dir.display()))?;
        if entry.path().is_dir() {
            entries.push(entry);
        }
    }
    entries.sort_by_key(|e| e.file_name());

    if entries.is_empty() {
        println!("No spec repos found in {}.", config.repos_dir.display());
        return Ok(());
    }

    let rows: Vec<RepoRow> = entries
        .iter()
        .map(|e| RepoRow {
            name: e.file_name().to_string_lossy().into_owned(),
            status: repo_status(&git, &e.path()),
            path: e.path().display().to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn repo_status(git: &GitCli, dir: &Path) -> String {
    match is_clean(git, dir) {
        Ok(true) => "clean".green().to_string(),
        Ok(false) => "not clean".yellow().to_string(),
        Err(err) => {
            log::debug!("status failed for {}: {err}", dir.display());
            "unknown".bright_black().to_string()
        }
    }
}
