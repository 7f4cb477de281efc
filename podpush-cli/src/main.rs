//! podpush: publish podspecs into a spec repo.
//!
//! # Usage
//!
//! ```text
//! podpush push <REPO> [--silent]
//! podpush lint [--silent] [--json]
//! podpush repo list
//! ```

mod commands;
mod console;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{lint::LintArgs, push::PushArgs, repo::RepoCommand};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "podpush",
    version,
    about = "Validate podspecs and publish them to a spec repo",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the `*.podspec` files in the current directory, update the
    /// local copy of REPO, add the specs to it, and push it to its remote.
    Push(PushArgs),

    /// Validate the `*.podspec` files in the current directory.
    Lint(LintArgs),

    /// Inspect local spec repos.
    Repo {
        #[command(subcommand)]
        command: RepoCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "[!]".red().bold(), error_line(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Push(args) => args.run(),
        Commands::Lint(args) => args.run(),
        Commands::Repo { command } => commands::repo::run(command),
    }
}

/// The error and its causes on one line. Library errors already spell out
/// their source in their own message, so a cause is skipped when its text is
/// already present.
fn error_line(err: &anyhow::Error) -> String {
    let mut line = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if line.contains(&text) {
            continue;
        }
        if !line.is_empty() {
            line.push_str(": ");
        }
        line.push_str(&text);
    }
    line
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .try_init();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
