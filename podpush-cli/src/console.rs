//! Terminal rendering of pipeline events and lint reports.

use colored::Colorize;

use podpush_lint::LintReport;
use podpush_publish::{PublishEvent, Reporter};

/// Prints events to stdout as they arrive.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: PublishEvent) {
        match event {
            PublishEvent::Stage { stage, repo } => {
                println!();
                println!("{}", stage.heading(&repo).yellow());
                println!();
            }
            PublishEvent::Linted(report) => print_lint_report(&report),
            PublishEvent::Added(record) => println!(" - {}", record.commit_message()),
            PublishEvent::RemoteOutput { output, .. } => print_raw(&output),
        }
    }
}

/// ` -> Foo (1.0)` followed by one indented line per finding.
pub fn print_lint_report(report: &LintReport) {
    let label = match &report.spec {
        Some(spec) => spec.to_string(),
        None => report.path.display().to_string(),
    };
    let marker = if report.passed() {
        "->".green()
    } else {
        "->".red()
    };
    println!(" {marker} {label}");
    for issue in &report.errors {
        println!("    - {} | {issue}", "ERROR".red());
    }
    for issue in &report.warnings {
        println!("    - {} | {issue}", "WARN".yellow());
    }
}

/// Command output is shown as-is.
fn print_raw(output: &str) {
    if output.is_empty() {
        return;
    }
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
}
