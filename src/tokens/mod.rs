//! SPDX tag tokenizer
//!
//! Recognizes the REUSE/SPDX file tags (`SPDX-FileCopyrightText:`,
//! `SPDX-License-Identifier:`, ...) at line level and splits a matching line
//! into a tag kind and its payload. Lines without a tag are not metadata and
//! simply yield nothing.

use crate::comments::CommentBlock;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ─── Tag Vocabulary ────────────────────────────────────────────────

/// Every metadata field the tokenizer recognizes, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    Copyright,
    LicenseIdentifier,
    AttributionText,
    Comment,
    Contributor,
    LicenseComments,
    LicenseConcluded,
    LicenseInfoInFile,
    Notice,
    FileType,
    /// `REUSE-IgnoreStart` / `REUSE-IgnoreEnd` directive, carries no payload
    IgnoreMarker,
}

impl TagKind {
    /// Stable scan order: the first kind matching a line wins
    pub const ALL: [TagKind; 11] = [
        TagKind::Copyright,
        TagKind::LicenseIdentifier,
        TagKind::AttributionText,
        TagKind::Comment,
        TagKind::Contributor,
        TagKind::LicenseComments,
        TagKind::LicenseConcluded,
        TagKind::LicenseInfoInFile,
        TagKind::Notice,
        TagKind::FileType,
        TagKind::IgnoreMarker,
    ];

    /// Canonical spelling of the tag, without its `:` delimiter
    pub fn spelling(&self) -> &'static str {
        match self {
            Self::Copyright => "SPDX-FileCopyrightText",
            Self::LicenseIdentifier => "SPDX-License-Identifier",
            Self::AttributionText => "SPDX-FileAttributionText",
            Self::Comment => "SPDX-FileComment",
            Self::Contributor => "SPDX-FileContributor",
            Self::LicenseComments => "SPDX-LicenseComments",
            Self::LicenseConcluded => "SPDX-LicenseConcluded",
            Self::LicenseInfoInFile => "SPDX-LicenseInfoInFile",
            Self::Notice => "SPDX-FileNotice",
            Self::FileType => "SPDX-FileType",
            Self::IgnoreMarker => "REUSE-Ignore",
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// A single recognized tag and the text that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TagKind,
    pub payload: String,
}

// ─── Patterns ──────────────────────────────────────────────────────

/// Delimited tags, each anchored on its own trailing `:`
static TAG_PATTERNS: Lazy<Vec<(TagKind, Regex)>> = Lazy::new(|| {
    TagKind::ALL
        .iter()
        .filter(|kind| **kind != TagKind::IgnoreMarker)
        .map(|&kind| {
            let pattern = format!("(?i){}:", regex::escape(kind.spelling()));
            (kind, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static IGNORE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)REUSE-Ignore(?:Start|End)").unwrap()
});

// ─── Tokenizer ─────────────────────────────────────────────────────

/// Tokenize a single line.
///
/// Text after an ignore marker is never scanned, so a marker suppresses any
/// tag that follows it on the same line. A marker with no tag before it yields
/// an [`TagKind::IgnoreMarker`] token with an empty payload.
pub fn tokenize(line: &str) -> Option<Token> {
    let (scan, has_marker) = match IGNORE_MARKER.find(line) {
        Some(marker) => (&line[..marker.start()], true),
        None => (line, false),
    };

    for (kind, pattern) in TAG_PATTERNS.iter() {
        if let Some(m) = pattern.find(scan) {
            return Some(Token {
                kind: *kind,
                payload: scan[m.end()..].trim().to_string(),
            });
        }
    }

    has_marker.then(|| Token {
        kind: TagKind::IgnoreMarker,
        payload: String::new(),
    })
}

/// Lazily tokenize every line of a comment block, in line order
pub fn extract_tokens(block: &CommentBlock) -> impl Iterator<Item = Token> + '_ {
    block.lines.iter().filter_map(|line| tokenize(&line.value))
}
