//! Configuration — `.reuse-sbom.toml`
//!
//! Controls where the package configuration lives, how deep header comments
//! are scanned, and which checksums each file record carries. Every field has
//! a default, so an absent or empty file is valid.

use crate::spdx::ChecksumAlgorithm;
use crate::{ReuseError, ReuseResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names probed by [`ReuseConfig::from_project_root`], in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".reuse-sbom.toml", "reuse-sbom.toml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReuseConfig {
    /// DEP-5 package configuration, relative to the project root
    #[serde(default = "default_dep5_path")]
    pub dep5_path: PathBuf,

    /// Lines scanned for header comments in each file
    #[serde(default = "default_max_comment_lines")]
    pub max_comment_lines: usize,

    /// Checksums computed for every file, in output order
    #[serde(default = "default_checksums")]
    pub checksums: Vec<ChecksumAlgorithm>,
}

fn default_dep5_path() -> PathBuf {
    PathBuf::from(".reuse/dep5")
}
fn default_max_comment_lines() -> usize {
    50
}
fn default_checksums() -> Vec<ChecksumAlgorithm> {
    vec![ChecksumAlgorithm::Sha1]
}

impl Default for ReuseConfig {
    fn default() -> Self {
        Self {
            dep5_path: default_dep5_path(),
            max_comment_lines: default_max_comment_lines(),
            checksums: default_checksums(),
        }
    }
}

impl ReuseConfig {
    /// Parse and validate TOML text
    pub fn parse(content: &str) -> ReuseResult<Self> {
        let config: ReuseConfig = toml::from_str(content)
            .map_err(|e| ReuseError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ReuseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load the first config file found in `root`, falling back to defaults
    pub fn from_project_root(root: &Path) -> Self {
        for name in CONFIG_FILE_NAMES {
            let path = root.join(name);
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}, using defaults", path.display(), e);
                }
            }
        }

        Self::default()
    }

    pub fn validate(&self) -> ReuseResult<()> {
        if self.checksums.is_empty() {
            return Err(ReuseError::Config(
                "at least one checksum algorithm is required".to_string(),
            ));
        }
        if self.max_comment_lines == 0 {
            return Err(ReuseError::Config(
                "max_comment_lines must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
