//! # reuse-sbom — REUSE metadata harvester and SPDX document builder
//!
//! Reads per-file copyright and license metadata from a source tree and
//! assembles it into an SPDX 2.3 Software Bill of Materials.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  SoftwareBillOfMaterials                     │
//! │        add_file / add_files / add_directory → JSON           │
//! │                            │                                 │
//! │  ┌─────────────────────────▼──────────────────────────────┐  │
//! │  │                      Resolver                          │  │
//! │  │  1. DEP-5 package config  (header, then Files stanza)  │  │
//! │  │  2. <file>.license sidecar (synthetic comment block)   │  │
//! │  │  3. Embedded header comments (or whole-file fallback)  │  │
//! │  └───────┬───────────────────┬────────────────────┬───────┘  │
//! │     Dep5Reader     LanguageCommentExtractor    tokens        │
//! │                                              (SPDX-* tags)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Later sources overwrite single-valued fields written by earlier ones, so
//! embedded comments win over the sidecar, which wins over the package
//! configuration. List fields accumulate across all three.

pub mod comments;
pub mod config;
pub mod dep5;
pub mod report;
pub mod resolver;
pub mod spdx;
pub mod tokens;

// Re-exports for convenience
pub use comments::{CommentBlock, CommentExtractor, CommentFormat, CommentLine, LanguageCommentExtractor};
pub use config::ReuseConfig;
pub use dep5::{Dep5Reader, FilesStanza, PackageConfig, PackageConfigReader, PackageHeader};
pub use report::{render_report, write_report, ReportFormat};
pub use resolver::Resolver;
pub use spdx::{
    Checksum, ChecksumAlgorithm, CreationInfo, FileType, Relationship, RelationshipType,
    SoftwareBillOfMaterials, SpdxFile,
};
pub use tokens::{extract_tokens, tokenize, TagKind, Token};

use std::path::PathBuf;
use thiserror::Error;

/// Placeholder SPDX uses for "nothing was declared"
pub const NOASSERTION: &str = "NOASSERTION";

#[derive(Error, Debug)]
pub enum ReuseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Malformed package configuration {}:{line}: {reason}", .path.display())]
    MalformedConfiguration {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{} is outside the project root {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ReuseResult<T> = Result<T, ReuseError>;
