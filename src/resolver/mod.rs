//! Source merge engine
//!
//! Builds one [`SpdxFile`] from up to three metadata sources, applied in this
//! order:
//!
//! 1. **Package configuration** (`.reuse/dep5`) — header defaults, then the
//!    matching `Files:` stanza
//! 2. **Sidecar** (`<file>.license`) — the whole file as one comment block
//! 3. **Embedded comments** — header comments of the file itself, or the whole
//!    file when its comment syntax is unknown
//!
//! Each source overwrites the single-valued fields written before it, so the
//! effective precedence is embedded > sidecar > package configuration.
//! Contributors, attribution texts, file types and declared licenses
//! accumulate across all sources in application order.

use crate::comments::{CommentBlock, CommentExtractor, LanguageCommentExtractor};
use crate::config::ReuseConfig;
use crate::dep5::{Dep5Reader, PackageConfig, PackageConfigReader};
use crate::spdx::{normalize_path, SpdxFile};
use crate::tokens::extract_tokens;
use crate::{ReuseError, ReuseResult};
use once_cell::unsync::OnceCell;
use std::path::{Component, Path, PathBuf};

pub struct Resolver {
    root: PathBuf,
    config: ReuseConfig,
    extractor: Box<dyn CommentExtractor>,
    package_reader: Box<dyn PackageConfigReader>,
    /// Parsed on first use; `None` when the project has no package config
    package_config: OnceCell<Option<PackageConfig>>,
}

impl Resolver {
    /// Resolver for `root` with default configuration and collaborators
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, ReuseConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ReuseConfig) -> Self {
        Self {
            root: root.into(),
            config,
            extractor: Box::new(LanguageCommentExtractor::new()),
            package_reader: Box::new(Dep5Reader::new()),
            package_config: OnceCell::new(),
        }
    }

    /// Resolver for `root`, configured from its `.reuse-sbom.toml` if present
    pub fn from_project_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = ReuseConfig::from_project_root(&root);
        Self::with_config(root, config)
    }

    pub fn with_extractor(mut self, extractor: impl CommentExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_package_reader(mut self, reader: impl PackageConfigReader + 'static) -> Self {
        self.package_reader = Box::new(reader);
        self.package_config = OnceCell::new();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ReuseConfig {
        &self.config
    }

    /// Resolve the metadata of one file.
    ///
    /// `path` is relative to the resolver root (absolute paths under the root
    /// are accepted too). The record's identifier hashes `path` as given. Any
    /// I/O failure on the file itself aborts with no record, as does a path
    /// that leaves the root.
    pub fn resolve(&self, path: &str) -> ReuseResult<SpdxFile> {
        let relative = self.relative(path)?;
        let full = self.root.join(&relative);

        let bytes = std::fs::read(&full)?;
        let mut file = SpdxFile::from_bytes(path, &bytes, &self.config.checksums);
        file.file_name = normalize_path(&relative);

        self.apply_package_config(&mut file)?;
        self.apply_sidecar(&mut file, &relative)?;
        self.apply_embedded(&mut file, &full, &bytes)?;

        Ok(file)
    }

    // ── Sources ─────────────────────────────────────────────────────

    fn apply_package_config(&self, file: &mut SpdxFile) -> ReuseResult<()> {
        let Some(config) = self.package_config()? else {
            return Ok(());
        };

        if let Some(copyright) = &config.header.copyright {
            file.set_copyright(copyright);
        }
        if let Some(license) = &config.header.license {
            file.set_license(license);
        }

        if let Some(stanza) = config.lookup(&file.file_name) {
            tracing::debug!("{}: matched package configuration stanza", file.file_name);
            if let Some(copyright) = &stanza.copyright {
                file.set_copyright(copyright);
            }
            if let Some(license) = &stanza.license {
                file.set_license(license);
            }
        }

        Ok(())
    }

    fn apply_sidecar(&self, file: &mut SpdxFile, relative: &str) -> ReuseResult<()> {
        let sidecar = self.root.join(format!("{}.license", relative));
        if !sidecar.is_file() {
            return Ok(());
        }

        tracing::debug!("{}: reading {}", file.file_name, sidecar.display());
        let bytes = std::fs::read(&sidecar)?;
        fold(file, &CommentBlock::synthetic(&String::from_utf8_lossy(&bytes)));
        Ok(())
    }

    fn apply_embedded(&self, file: &mut SpdxFile, full: &Path, bytes: &[u8]) -> ReuseResult<()> {
        if !self.extractor.is_supported(full) {
            tracing::debug!("{}: unknown comment syntax, scanning whole file", file.file_name);
            fold(file, &CommentBlock::synthetic(&String::from_utf8_lossy(bytes)));
            return Ok(());
        }

        for block in self
            .extractor
            .extract_from(full, bytes, self.config.max_comment_lines)?
        {
            fold(file, &block);
        }
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────────

    fn package_config(&self) -> ReuseResult<Option<&PackageConfig>> {
        self.package_config
            .get_or_try_init(|| -> ReuseResult<Option<PackageConfig>> {
                let path = self.root.join(&self.config.dep5_path);
                if !path.is_file() {
                    tracing::debug!("No package configuration at {}", path.display());
                    return Ok(None);
                }
                let config = self.package_reader.read(&path)?;
                tracing::info!("Loaded package configuration from {}", path.display());
                Ok(Some(config))
            })
            .map(Option::as_ref)
    }

    /// `path` relative to the root, `/`-separated
    fn relative(&self, path: &str) -> ReuseResult<String> {
        let candidate = Path::new(path);
        let relative = match candidate.strip_prefix(&self.root) {
            Ok(stripped) => stripped,
            Err(_) => candidate,
        };

        let escapes = relative.has_root()
            || relative.components().any(|c| {
                matches!(c, Component::ParentDir | Component::Prefix(_))
            });
        if escapes {
            return Err(ReuseError::OutsideRoot {
                path: candidate.to_path_buf(),
                root: self.root.clone(),
            });
        }

        Ok(relative.to_string_lossy().replace('\\', "/"))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(".")
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("root", &self.root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn fold(file: &mut SpdxFile, block: &CommentBlock) {
    for token in extract_tokens(block) {
        file.apply(token);
    }
}
