//! Report generation — SPDX JSON and SPDX tag-value output
//!
//! Turns a finished [`SoftwareBillOfMaterials`] into text suitable for
//! publishing next to a release or feeding to SPDX tooling.

pub mod json;
pub mod tag_value;

use crate::spdx::SoftwareBillOfMaterials;
use crate::ReuseResult;
use std::path::Path;

/// Output format for the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// SPDX 2.3 JSON
    Json,
    /// SPDX 2.3 tag-value
    TagValue,
}

/// Write a document in the specified format
pub fn write_report(
    document: &SoftwareBillOfMaterials,
    format: ReportFormat,
    output: &Path,
) -> ReuseResult<()> {
    let content = render_report(document, format)?;
    std::fs::write(output, content)?;
    tracing::info!("Wrote {} files to {}", document.files.len(), output.display());
    Ok(())
}

/// Render a document to a string
pub fn render_report(
    document: &SoftwareBillOfMaterials,
    format: ReportFormat,
) -> ReuseResult<String> {
    match format {
        ReportFormat::Json => json::render(document),
        ReportFormat::TagValue => Ok(tag_value::render(document)),
    }
}
