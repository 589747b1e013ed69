//! JSON report renderer

use crate::spdx::SoftwareBillOfMaterials;
use crate::ReuseResult;

/// Render a document as pretty-printed SPDX JSON
pub fn render(document: &SoftwareBillOfMaterials) -> ReuseResult<String> {
    document.to_json()
}
