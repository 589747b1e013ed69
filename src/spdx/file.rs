//! SPDX File — the per-file metadata record
//!
//! A record is a snapshot: its identifier depends only on the path it was
//! created for, its checksums only on the bytes read at construction. Every
//! later change comes through [`SpdxFile::apply`] (tags) or the overwrite
//! setters used by the package configuration.

use crate::tokens::{TagKind, Token};
use crate::{ReuseResult, NOASSERTION};
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::path::Path;

// ─── Checksums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA256")]
    Sha256,
}

impl ChecksumAlgorithm {
    /// Lowercase hex digest of `bytes`
    pub fn digest(&self, bytes: &[u8]) -> String {
        match self {
            Self::Sha1 => hex::encode(sha1::Sha1::digest(bytes)),
            Self::Sha256 => hex::encode(sha2::Sha256::digest(bytes)),
        }
    }
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA1"),
            Self::Sha256 => write!(f, "SHA256"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub checksum_value: String,
}

// ─── File Types ────────────────────────────────────────────────────

/// SPDX file classification.
///
/// Known values are canonicalized to their SPDX spelling; anything else is
/// carried through verbatim as [`FileType::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Application,
    Audio,
    Image,
    Text,
    Video,
    Documentation,
    Spdx,
    Other,
    Unrecognized(String),
}

impl FileType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "SOURCE" => Self::Source,
            "BINARY" => Self::Binary,
            "ARCHIVE" => Self::Archive,
            "APPLICATION" => Self::Application,
            "AUDIO" => Self::Audio,
            "IMAGE" => Self::Image,
            "TEXT" => Self::Text,
            "VIDEO" => Self::Video,
            "DOCUMENTATION" => Self::Documentation,
            "SPDX" => Self::Spdx,
            "OTHER" => Self::Other,
            _ => Self::Unrecognized(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Source => "SOURCE",
            Self::Binary => "BINARY",
            Self::Archive => "ARCHIVE",
            Self::Application => "APPLICATION",
            Self::Audio => "AUDIO",
            Self::Image => "IMAGE",
            Self::Text => "TEXT",
            Self::Video => "VIDEO",
            Self::Documentation => "DOCUMENTATION",
            Self::Spdx => "SPDX",
            Self::Other => "OTHER",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for FileType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── File Record ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxFile {
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub checksums: Vec<Checksum>,
    pub file_name: String,
    /// `None` until some source declares a copyright holder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    pub license_concluded: String,
    /// Either exactly `["NOASSERTION"]` or one or more real identifiers
    pub license_info_in_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_comments: Option<String>,
    pub file_contributors: Vec<String>,
    pub attribution_texts: Vec<String>,
    pub file_types: Vec<FileType>,
}

impl SpdxFile {
    /// Read `root/path` and build a fresh record for it
    pub fn new(root: &Path, path: &str, algorithms: &[ChecksumAlgorithm]) -> ReuseResult<Self> {
        let bytes = std::fs::read(root.join(path))?;
        Ok(Self::from_bytes(path, &bytes, algorithms))
    }

    /// Build a record from already-read file contents.
    ///
    /// The identifier hashes `path` exactly as given, before normalization,
    /// so callers that do or do not prefix `./` get distinct but stable ids.
    pub fn from_bytes(path: &str, bytes: &[u8], algorithms: &[ChecksumAlgorithm]) -> Self {
        Self {
            spdx_id: spdx_id(path),
            checksums: algorithms
                .iter()
                .map(|algorithm| Checksum {
                    algorithm: *algorithm,
                    checksum_value: algorithm.digest(bytes),
                })
                .collect(),
            file_name: normalize_path(path),
            copyright_text: None,
            license_concluded: NOASSERTION.to_string(),
            license_info_in_files: vec![NOASSERTION.to_string()],
            comment: None,
            notice_text: None,
            license_comments: None,
            file_contributors: Vec::new(),
            attribution_texts: Vec::new(),
            file_types: Vec::new(),
        }
    }

    /// Fold one extracted tag into the record
    pub fn apply(&mut self, token: Token) {
        let Token { kind, payload } = token;
        if payload.is_empty() {
            if kind != TagKind::IgnoreMarker {
                tracing::debug!("{}: ignoring empty {} tag", self.file_name, kind);
            }
            return;
        }

        match kind {
            TagKind::Copyright => self.copyright_text = Some(payload),
            TagKind::LicenseConcluded => self.license_concluded = payload,
            TagKind::LicenseIdentifier | TagKind::LicenseInfoInFile => self.add_license(payload),
            TagKind::Contributor => self.file_contributors.push(payload),
            TagKind::AttributionText => self.attribution_texts.push(payload),
            TagKind::FileType => {
                let file_type = FileType::parse(&payload);
                if !file_type.is_recognized() {
                    tracing::warn!(
                        "{}: unrecognized SPDX-FileType {:?}, keeping as given",
                        self.file_name,
                        payload
                    );
                }
                self.file_types.push(file_type);
            }
            TagKind::Comment => self.comment = Some(payload),
            TagKind::LicenseComments => self.license_comments = Some(payload),
            TagKind::Notice => self.notice_text = Some(payload),
            TagKind::IgnoreMarker => {}
        }
    }

    /// Declare a license found in the file: replaces the placeholder on first
    /// use, appends afterwards. An explicit `NOASSERTION` never mixes with
    /// real identifiers.
    pub fn add_license(&mut self, license: String) {
        if license == NOASSERTION {
            return;
        }
        if self.has_no_license() {
            self.license_info_in_files = vec![license];
        } else {
            self.license_info_in_files.push(license);
        }
    }

    /// Overwrite the declared licenses with a single identifier
    pub fn set_license(&mut self, license: &str) {
        self.license_info_in_files = vec![license.to_string()];
    }

    pub fn set_copyright(&mut self, copyright: &str) {
        self.copyright_text = Some(copyright.to_string());
    }

    /// True while no license has been declared by any source
    pub fn has_no_license(&self) -> bool {
        self.license_info_in_files.iter().any(|l| l == NOASSERTION)
    }
}

// ─── Helpers ───────────────────────────────────────────────────────

/// `SPDXRef-` followed by the SHA-1 of the path string
pub fn spdx_id(path: &str) -> String {
    format!("SPDXRef-{}", ChecksumAlgorithm::Sha1.digest(path.as_bytes()))
}

/// Render a path as an explicit relative reference (`./src/main.rs`)
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    if path.starts_with("./") {
        path
    } else {
        format!("./{}", path)
    }
}
