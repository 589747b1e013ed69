//! SPDX tag-value renderer

use crate::spdx::{SoftwareBillOfMaterials, SpdxFile};
use crate::NOASSERTION;

pub fn render(document: &SoftwareBillOfMaterials) -> String {
    let mut output = String::new();

    output.push_str(&format!("SPDXVersion: {}\n", document.spdx_version));
    output.push_str(&format!("DataLicense: {}\n", document.data_license));
    output.push_str(&format!("SPDXID: {}\n", document.spdx_id));
    output.push_str(&format!("DocumentName: {}\n", document.name));
    output.push_str(&format!("DocumentNamespace: {}\n", document.document_namespace));
    for creator in &document.creation_info.creators {
        output.push_str(&format!("Creator: {}\n", creator));
    }
    output.push_str(&format!("Created: {}\n", document.creation_info.created));

    for file in &document.files {
        output.push('\n');
        render_file(&mut output, file);
    }

    if !document.relationships.is_empty() {
        output.push('\n');
    }
    for rel in &document.relationships {
        output.push_str(&format!(
            "Relationship: {} {} {}\n",
            rel.spdx_element_id, rel.relationship_type, rel.related_spdx_element
        ));
    }

    output
}

fn render_file(output: &mut String, file: &SpdxFile) {
    output.push_str(&format!("FileName: {}\n", file.file_name));
    output.push_str(&format!("SPDXID: {}\n", file.spdx_id));
    for file_type in &file.file_types {
        output.push_str(&format!("FileType: {}\n", file_type));
    }
    for checksum in &file.checksums {
        output.push_str(&format!(
            "FileChecksum: {}: {}\n",
            checksum.algorithm, checksum.checksum_value
        ));
    }
    output.push_str(&format!("LicenseConcluded: {}\n", file.license_concluded));
    for license in &file.license_info_in_files {
        output.push_str(&format!("LicenseInfoInFile: {}\n", license));
    }
    if let Some(comments) = &file.license_comments {
        output.push_str(&format!("LicenseComments: {}\n", text(comments)));
    }
    let copyright = file.copyright_text.as_deref().unwrap_or(NOASSERTION);
    output.push_str(&format!("FileCopyrightText: {}\n", text(copyright)));
    if let Some(comment) = &file.comment {
        output.push_str(&format!("FileComment: {}\n", text(comment)));
    }
    if let Some(notice) = &file.notice_text {
        output.push_str(&format!("FileNotice: {}\n", text(notice)));
    }
    for contributor in &file.file_contributors {
        output.push_str(&format!("FileContributor: {}\n", contributor));
    }
    for attribution in &file.attribution_texts {
        output.push_str(&format!("FileAttributionText: {}\n", text(attribution)));
    }
}

/// Multi-line values must be wrapped in `<text>` tags
fn text(value: &str) -> String {
    if value.contains('\n') {
        format!("<text>{}</text>", value)
    } else {
        value.to_string()
    }
}
