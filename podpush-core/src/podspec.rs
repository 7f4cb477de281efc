//! Podspec reader.
//!
//! Podspecs are Ruby, but the attributes podpush cares about are almost always
//! plain assignments on the block variable:
//!
//! ```text
//! Pod::Spec.new do |s|
//!   s.name    = 'Foo'
//!   s.version = '1.0'
//!   s.source  = { :git => 'https://example.com/foo.git', :tag => s.version.to_s }
//! end
//! ```
//!
//! Nothing is evaluated. Quoted string values are unquoted; any other right-hand
//! side is kept raw. The first assignment of an attribute wins, and assignments
//! on other receivers (subspec blocks) are ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SpecError;
use crate::types::{SpecId, SpecName, SpecVersion};

/// File extension of spec files.
pub const SPEC_EXTENSION: &str = "podspec";

/// A parsed podspec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Podspec {
    pub path: PathBuf,
    pub id: SpecId,
    attributes: BTreeMap<String, String>,
}

impl Podspec {
    /// Read and parse the podspec at `path`.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Parse podspec source; `path` is only used for error messages.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, SpecError> {
        let attributes = extract_attributes(contents);

        let name = required(path, &attributes, "name")?;
        let name = SpecName::parse(name).map_err(|reason| SpecError::InvalidAttribute {
            path: path.to_path_buf(),
            attribute: "name",
            value: name.to_owned(),
            reason,
        })?;

        let version = required(path, &attributes, "version")?;
        let version =
            SpecVersion::parse(version).map_err(|reason| SpecError::InvalidAttribute {
                path: path.to_path_buf(),
                attribute: "version",
                value: version.to_owned(),
                reason,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            id: SpecId { name, version },
            attributes,
        })
    }

    /// Value of `attribute`, unquoted if it was a string literal.
    pub fn attribute(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    pub fn has(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }
}

fn required<'a>(
    path: &Path,
    attributes: &'a BTreeMap<String, String>,
    attribute: &'static str,
) -> Result<&'a str, SpecError> {
    attributes
        .get(attribute)
        .map(String::as_str)
        .ok_or_else(|| SpecError::MissingAttribute {
            path: path.to_path_buf(),
            attribute,
        })
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Pod::Spec(?:ification)?\.new\s+do\s*\|\s*(\w+)\s*\|").expect("valid regex")
    })
}

fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\w+)\.(\w+)\s*=\s*([^=\s].*?)\s*$").expect("valid regex")
    })
}

fn string_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^(?:'([^']*)'|"([^"]*)")(?:\.freeze)?$"#).expect("valid regex")
    })
}

fn extract_attributes(contents: &str) -> BTreeMap<String, String> {
    let receiver = header_re()
        .captures(contents)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());

    let mut attributes = BTreeMap::new();
    for line in contents.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        let Some(caps) = assignment_re().captures(line) else {
            continue;
        };
        if receiver.is_some_and(|r| r != &caps[1]) {
            continue;
        }
        attributes
            .entry(caps[2].to_owned())
            .or_insert_with(|| unquote(&caps[3]));
    }
    attributes
}

fn unquote(rhs: &str) -> String {
    match string_literal_re().captures(rhs) {
        Some(caps) => caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_owned())
            .unwrap_or_default(),
        None => rhs.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
