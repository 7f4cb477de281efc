//! Podspec validation for `podpush-lint`.
//!
//! [`Linter`] checks each `*.podspec` against a fixed rule set and produces one
//! [`LintReport`] per file. Errors make a file fail; warnings are informational.
//! The publish pipeline only depends on the [`SpecValidator`] trait, so other
//! validators can be swapped in.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use podpush_core::{Podspec, SpecId};
use regex::Regex;
use serde::Serialize;

/// Maximum summary length before a warning is raised.
pub const MAX_SUMMARY_LEN: usize = 140;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One finding for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    /// Attribute the finding is about, if any (e.g. `"summary"`).
    pub attribute: Option<&'static str>,
    pub message: String,
}

impl LintIssue {
    fn on(attribute: &'static str, message: impl Into<String>) -> Self {
        Self {
            attribute: Some(attribute),
            message: message.into(),
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute {
            Some(attr) => write!(f, "[{attr}] {}", self.message),
            None => self.message.fmt(f),
        }
    }
}

/// Lint outcome for a single spec file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub path: PathBuf,
    /// Present when the file could be parsed.
    pub spec: Option<SpecId>,
    pub errors: Vec<LintIssue>,
    pub warnings: Vec<LintIssue>,
}

impl LintReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Aggregate outcome for a set of spec files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub reports: Vec<LintReport>,
}

impl ValidationReport {
    /// `true` when every file passed. Vacuously true for no files.
    pub fn all_valid(&self) -> bool {
        self.reports.iter().all(LintReport::passed)
    }

    /// Paths of files with at least one error, in report order.
    pub fn failed(&self) -> Vec<&Path> {
        self.reports
            .iter()
            .filter(|r| !r.passed())
            .map(|r| r.path.as_path())
            .collect()
    }
}

/// Something that decides whether spec files may be published.
pub trait SpecValidator {
    fn validate(&self, files: &[PathBuf]) -> ValidationReport;
}

impl<T: SpecValidator + ?Sized> SpecValidator for &T {
    fn validate(&self, files: &[PathBuf]) -> ValidationReport {
        (**self).validate(files)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Built-in rule-based validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linter;

impl SpecValidator for Linter {
    fn validate(&self, files: &[PathBuf]) -> ValidationReport {
        ValidationReport {
            reports: files.iter().map(|f| lint_file(f)).collect(),
        }
    }
}

/// Lint the podspec at `path`. Unreadable or unparsable files yield a report
/// with a single error rather than an `Err`.
pub fn lint_file(path: &Path) -> LintReport {
    let report = match Podspec::from_file(path) {
        Ok(spec) => lint_spec(&spec),
        Err(err) => LintReport {
            path: path.to_path_buf(),
            spec: None,
            errors: vec![LintIssue {
                attribute: None,
                message: err.to_string(),
            }],
            warnings: vec![],
        },
    };
    for warning in &report.warnings {
        tracing::debug!("{}: {warning}", path.display());
    }
    report
}

/// Apply every rule to an already-parsed spec.
pub fn lint_spec(spec: &Podspec) -> LintReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_version(spec, &mut errors);
    check_required(spec, &mut errors);
    check_file_name(spec, &mut errors);
    check_license(spec, &mut warnings);
    check_summary_length(spec, &mut warnings);

    LintReport {
        path: spec.path.clone(),
        spec: Some(spec.id.clone()),
        errors,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+(\.\d+)*(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$").expect("valid regex")
    })
}

fn check_version(spec: &Podspec, errors: &mut Vec<LintIssue>) {
    let version = spec.id.version.as_str();
    if !version_re().is_match(version) {
        errors.push(LintIssue::on(
            "version",
            format!("'{version}' is not a dotted numeric version"),
        ));
    }
}

fn check_required(spec: &Podspec, errors: &mut Vec<LintIssue>) {
    for attr in ["summary", "homepage", "source"] {
        if !spec.has(attr) {
            errors.push(LintIssue::on(attr, "required attribute is missing"));
        }
    }
    if !spec.has("authors") && !spec.has("author") {
        errors.push(LintIssue::on("authors", "required attribute is missing"));
    }
}

fn check_file_name(spec: &Podspec, errors: &mut Vec<LintIssue>) {
    let stem = spec.path.file_stem().map(|s| s.to_string_lossy());
    if stem.as_deref() != Some(spec.id.name.as_str()) {
        errors.push(LintIssue::on(
            "name",
            format!("file name should be `{}`", spec.id.file_name()),
        ));
    }
}

fn check_license(spec: &Podspec, warnings: &mut Vec<LintIssue>) {
    if !spec.has("license") {
        warnings.push(LintIssue::on("license", "missing license"));
    }
}

fn check_summary_length(spec: &Podspec, warnings: &mut Vec<LintIssue>) {
    if let Some(summary) = spec.attribute("summary") {
        let len = summary.chars().count();
        if len > MAX_SUMMARY_LEN {
            warnings.push(LintIssue::on(
                "summary",
                format!("summary is {len} characters; keep it under {MAX_SUMMARY_LEN}"),
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
