//! Software Bill of Materials — the SPDX document a batch of files lands in

use super::{Relationship, SpdxFile};
use crate::resolver::Resolver;
use crate::ReuseResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;
use walkdir::WalkDir;

/// Identifier of the document element every file is described by
pub const DOCUMENT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationInfo {
    /// UTC, `YYYY-MM-DDThh:mm:ssZ`
    pub created: String,
    pub creators: Vec<String>,
}

/// SPDX document under construction.
///
/// Grows monotonically: files and their DESCRIBES relationships are appended
/// in the order they are added and never reordered or de-duplicated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareBillOfMaterials {
    pub spdx_version: String,
    pub data_license: String,
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub name: String,
    pub document_namespace: String,
    pub creation_info: CreationInfo,
    pub files: Vec<SpdxFile>,
    pub relationships: Vec<Relationship>,
    #[serde(skip)]
    resolver: Resolver,
}

impl SoftwareBillOfMaterials {
    /// Empty document; the creation timestamp is taken now, once
    pub fn new(name: &str, tool: &str) -> Self {
        Self {
            spdx_version: "SPDX-2.3".to_string(),
            data_license: "CC0-1.0".to_string(),
            spdx_id: DOCUMENT_SPDX_ID.to_string(),
            name: name.to_string(),
            document_namespace: namespace(name, Uuid::new_v4()),
            creation_info: CreationInfo {
                created: format_timestamp(Utc::now()),
                creators: vec![format!("Tool: {}", tool)],
            },
            files: Vec::new(),
            relationships: Vec::new(),
            resolver: Resolver::default(),
        }
    }

    /// Use a specific resolver (project root, DEP-5 location, checksums, ...)
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Pin the creation timestamp. The namespace is then derived from the
    /// name and timestamp, so two pinned builds of the same tree are equal.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.creation_info.created = format_timestamp(created);
        let seed = format!("{}@{}", self.name, self.creation_info.created);
        self.document_namespace = namespace(
            &self.name,
            Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.as_bytes()),
        );
        self
    }

    /// Use a caller-chosen `documentNamespace`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.document_namespace = namespace.into();
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve one file and describe it from the document.
    ///
    /// `<file>.license` sidecars describe another file and are skipped.
    pub fn add_file(&mut self, path: &str) -> ReuseResult<()> {
        if path.ends_with(".license") {
            tracing::debug!("Skipping license sidecar {}", path);
            return Ok(());
        }

        let file = self.resolver.resolve(path)?;
        self.relationships
            .push(Relationship::describes(&self.spdx_id, &file.spdx_id));
        self.files.push(file);
        Ok(())
    }

    /// Add files one at a time, in order. The first failure stops the batch;
    /// files added before it stay in the document.
    pub fn add_files<I, P>(&mut self, paths: I) -> ReuseResult<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let before = self.files.len();
        for path in paths {
            self.add_file(path.as_ref())?;
        }
        tracing::info!("Added {} files to {}", self.files.len() - before, self.name);
        Ok(())
    }

    /// Walk `dir` (relative to the resolver root) and add every file found,
    /// in file-name order. VCS and REUSE metadata directories are skipped.
    /// Returns the number of files added.
    pub fn add_directory(&mut self, dir: &Path) -> ReuseResult<usize> {
        let root = self.resolver.root().to_path_buf();
        let mut paths = Vec::new();

        for entry in WalkDir::new(root.join(dir))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_metadata_dir(e.file_name().to_str().unwrap_or("")))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            paths.push(relative.to_string_lossy().replace('\\', "/"));
        }

        let before = self.files.len();
        self.add_files(&paths)?;
        Ok(self.files.len() - before)
    }

    /// Pretty-printed SPDX JSON
    pub fn to_json(&self) -> ReuseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ─── Helpers ───────────────────────────────────────────────────────

fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn namespace(name: &str, id: Uuid) -> String {
    format!("https://spdx.org/spdxdocs/{}-{}", sanitize_namespace(name), id)
}

fn sanitize_namespace(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '.' { c } else { '-' })
        .collect()
}

fn is_metadata_dir(name: &str) -> bool {
    matches!(name, ".git" | ".hg" | ".svn" | ".reuse")
}
