//! Package-level copyright configuration (Debian DEP-5)
//!
//! REUSE lets a repository declare copyright and licensing for files that
//! cannot carry a header in `.reuse/dep5`, using the machine-readable
//! `debian/copyright` format:
//!
//! ```text
//! Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/
//! Upstream-Name: example
//! Copyright: 2023 Example Corp
//! License: MIT
//!
//! Files: assets/*
//! Copyright: 2023 Jane Doe
//! License: CC-BY-4.0
//! ```
//!
//! The first paragraph is the header and supplies repository-wide defaults;
//! every `Files:` paragraph is a stanza, and the last stanza matching a path
//! applies to it.

pub mod pattern;

use crate::{ReuseError, ReuseResult};
use std::path::Path;

pub use pattern::FilePattern;

// ─── Data Structures ────────────────────────────────────────────────

/// Header paragraph with repository-wide defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageHeader {
    pub format: Option<String>,
    pub upstream_name: Option<String>,
    pub upstream_contact: Option<String>,
    pub source: Option<String>,
    pub copyright: Option<String>,
    /// License short name (first line of the `License:` field)
    pub license: Option<String>,
}

/// A `Files:` paragraph
#[derive(Debug, Clone)]
pub struct FilesStanza {
    pub patterns: Vec<FilePattern>,
    pub copyright: Option<String>,
    pub license: Option<String>,
    pub comment: Option<String>,
}

impl FilesStanza {
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

/// Parsed package configuration
#[derive(Debug, Clone, Default)]
pub struct PackageConfig {
    pub header: PackageHeader,
    pub stanzas: Vec<FilesStanza>,
}

impl PackageConfig {
    /// Parse DEP-5 text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> ReuseResult<Self> {
        let mut config = PackageConfig::default();

        for (index, paragraph) in paragraphs(text, origin)?.into_iter().enumerate() {
            match paragraph.get("Files") {
                Some(files) => {
                    let patterns = files
                        .split_whitespace()
                        .map(|raw| {
                            FilePattern::new(raw).map_err(|e| ReuseError::MalformedConfiguration {
                                path: origin.to_path_buf(),
                                line: paragraph.line,
                                reason: format!("invalid Files pattern {:?}: {}", raw, e),
                            })
                        })
                        .collect::<ReuseResult<Vec<_>>>()?;

                    config.stanzas.push(FilesStanza {
                        patterns,
                        copyright: paragraph.get("Copyright").map(str::to_string),
                        license: paragraph.get("License").and_then(license_name),
                        comment: paragraph.get("Comment").map(str::to_string),
                    });
                }
                None if index == 0 => {
                    config.header = PackageHeader {
                        format: paragraph.get("Format").map(str::to_string),
                        upstream_name: paragraph.get("Upstream-Name").map(str::to_string),
                        upstream_contact: paragraph.get("Upstream-Contact").map(str::to_string),
                        source: paragraph.get("Source").map(str::to_string),
                        copyright: paragraph.get("Copyright").map(str::to_string),
                        license: paragraph.get("License").and_then(license_name),
                    };
                }
                // Stand-alone License paragraphs carry full license texts
                None => {}
            }
        }

        Ok(config)
    }

    /// Stanza governing a repository-relative path; the last match wins
    pub fn lookup(&self, path: &str) -> Option<&FilesStanza> {
        self.stanzas.iter().rev().find(|stanza| stanza.matches(path))
    }
}

// ─── Reader Trait ───────────────────────────────────────────────────

/// Loads a package configuration file
pub trait PackageConfigReader {
    fn read(&self, path: &Path) -> ReuseResult<PackageConfig>;
}

/// Reads DEP-5 files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct Dep5Reader;

impl Dep5Reader {
    pub fn new() -> Self {
        Self
    }
}

impl PackageConfigReader for Dep5Reader {
    fn read(&self, path: &Path) -> ReuseResult<PackageConfig> {
        let text = std::fs::read_to_string(path)?;
        let config = PackageConfig::parse(&text, path)?;
        tracing::debug!(
            "Parsed {} ({} Files stanzas)",
            path.display(),
            config.stanzas.len()
        );
        Ok(config)
    }
}

// ─── Paragraph Parser ───────────────────────────────────────────────

struct Paragraph {
    /// 1-based line the paragraph starts on
    line: usize,
    fields: Vec<(String, String)>,
}

impl Paragraph {
    /// Field value, trimmed; field names are case-insensitive
    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }
}

fn paragraphs(text: &str, origin: &Path) -> ReuseResult<Vec<Paragraph>> {
    let malformed = |line: usize, reason: String| ReuseError::MalformedConfiguration {
        path: origin.to_path_buf(),
        line,
        reason,
    };

    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;

        if raw.trim().is_empty() {
            paragraphs.extend(current.take());
            continue;
        }
        if raw.starts_with('#') {
            continue;
        }

        if raw.starts_with(' ') || raw.starts_with('\t') {
            let Some((_, value)) = current.as_mut().and_then(|p| p.fields.last_mut()) else {
                return Err(malformed(line, "continuation line outside of a field".to_string()));
            };
            let continued = raw.trim();
            value.push('\n');
            // A lone "." stands for an empty line
            if continued != "." {
                value.push_str(continued);
            }
            continue;
        }

        let Some((name, value)) = raw.split_once(':') else {
            return Err(malformed(line, format!("expected `Field: value`, found {:?}", raw)));
        };
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(malformed(line, format!("invalid field name {:?}", name)));
        }

        current
            .get_or_insert_with(|| Paragraph {
                line,
                fields: Vec::new(),
            })
            .fields
            .push((name.to_string(), value.trim().to_string()));
    }

    paragraphs.extend(current);
    Ok(paragraphs)
}

/// Short license name: the first line of a `License:` field
fn license_name(value: &str) -> Option<String> {
    value
        .lines()
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
