//! End-to-end properties of the merge engine and document assembler
//!
//! Every test builds a small project in a temporary directory and drives it
//! through `SoftwareBillOfMaterials`, checking the JSON a consumer would see.

use reuse_sbom::spdx::spdx_id;
use reuse_sbom::{ReuseError, Resolver, SoftwareBillOfMaterials, NOASSERTION};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// ─── Helpers ────────────────────────────────────────────────────────

const FULL_FILE: &str = concat!(
    "/*\n",
    " * SPDX-FileCopyrightText: 2023 Jane Doe <jane@example.com>\n",
    " * SPDX-License-Identifier: MIT\n",
    " * SPDX-License-Identifier: Apache-2.0\n",
    " * SPDX-FileContributor: Alice\n",
    " * SPDX-FileContributor: Bob\n",
    " * SPDX-FileAttributionText: Portions by Carol\n",
    " * SPDX-FileComment: Generated parser\n",
    " * SPDX-LicenseComments: Reviewed by legal\n",
    " * SPDX-LicenseConcluded: MIT\n",
    " * SPDX-FileNotice: Keep this notice\n",
    " * SPDX-FileType: SOURCE\n",
    " * SPDX-FileType: text\n",
    " */\n",
    "export const answer = 42;\n",
);

const MINIMAL_FILE: &str = "// SPDX-License-Identifier: MIT\nexport {};\n";

const DEP5: &str = "\
Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/
Upstream-Name: test-project
Copyright: 2020 Project Authors
License: BSD-3-Clause

Files: src/missing-info.ts
Copyright: 2022 Config Holder
License: ISC
";

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }
    dir
}

fn document(dir: &TempDir) -> SoftwareBillOfMaterials {
    SoftwareBillOfMaterials::new("test-project", "ReuseSbom-v0")
        .with_resolver(Resolver::new(dir.path()))
        .with_created(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
}

fn to_value(doc: &SoftwareBillOfMaterials) -> Value {
    serde_json::from_str(&doc.to_json().unwrap()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Section 1: Record shape
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_full_file_record() {
    let dir = project(&[("src/full-file.ts", FULL_FILE)]);
    let mut doc = document(&dir);
    doc.add_file("src/full-file.ts").unwrap();

    let value = to_value(&doc);
    assert_eq!(
        value["files"][0],
        json!({
            "SPDXID": "SPDXRef-91b1e87f9d91472246f13283182470d802011ec1",
            "checksums": [{
                "algorithm": "SHA1",
                "checksumValue": "7231ab6618d1b94b43bfe7ff4820143f46223af5"
            }],
            "fileName": "./src/full-file.ts",
            "copyrightText": "2023 Jane Doe <jane@example.com>",
            "licenseConcluded": "MIT",
            "licenseInfoInFiles": ["MIT", "Apache-2.0"],
            "comment": "Generated parser",
            "noticeText": "Keep this notice",
            "licenseComments": "Reviewed by legal",
            "fileContributors": ["Alice", "Bob"],
            "attributionTexts": ["Portions by Carol"],
            "fileTypes": ["SOURCE", "TEXT"]
        })
    );
    assert_eq!(
        value["relationships"],
        json!([{
            "spdxElementId": "SPDXRef-DOCUMENT",
            "relationshipType": "DESCRIBES",
            "relatedSpdxElement": "SPDXRef-91b1e87f9d91472246f13283182470d802011ec1"
        }])
    );
    assert_eq!(value["creationInfo"]["created"], "2023-01-01T00:00:00Z");
    assert_eq!(value["creationInfo"]["creators"], json!(["Tool: ReuseSbom-v0"]));
}

#[test]
fn test_optional_fields_absent_when_never_supplied() {
    let dir = project(&[("src/minimal-file.ts", MINIMAL_FILE)]);
    let mut doc = document(&dir);
    doc.add_file("src/minimal-file.ts").unwrap();

    let value = to_value(&doc);
    let file = value["files"][0].as_object().unwrap();
    assert!(!file.contains_key("comment"));
    assert!(!file.contains_key("noticeText"));
    assert!(!file.contains_key("licenseComments"));
    assert!(!file.contains_key("copyrightText"));
    assert_eq!(file["licenseConcluded"], NOASSERTION);
    assert_eq!(file["licenseInfoInFiles"], json!(["MIT"]));
    assert_eq!(file["fileContributors"], json!([]));
    assert_eq!(file["fileTypes"], json!([]));
}

// ═══════════════════════════════════════════════════════════════════
// Section 2: Determinism and identity
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_resolution_is_deterministic() {
    let dir = project(&[("src/full-file.ts", FULL_FILE), (".reuse/dep5", DEP5)]);

    let mut first = document(&dir);
    first.add_file("src/full-file.ts").unwrap();
    let mut second = document(&dir);
    second.add_file("src/full-file.ts").unwrap();

    assert_eq!(
        serde_json::to_string(&first.files).unwrap(),
        serde_json::to_string(&second.files).unwrap()
    );
}

#[test]
fn test_pinned_documents_are_identical() {
    let dir = project(&[
        ("src/full-file.ts", FULL_FILE),
        ("src/minimal-file.ts", MINIMAL_FILE),
        (".reuse/dep5", DEP5),
    ]);

    let mut first = document(&dir);
    first.add_files(["src/full-file.ts", "src/minimal-file.ts"]).unwrap();
    let mut second = document(&dir);
    second.add_files(["src/full-file.ts", "src/minimal-file.ts"]).unwrap();

    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_identifier_depends_on_path_only() {
    let dir = project(&[("a.ts", MINIMAL_FILE), ("b.ts", MINIMAL_FILE)]);
    let resolver = Resolver::new(dir.path());

    let a = resolver.resolve("a.ts").unwrap();
    let b = resolver.resolve("b.ts").unwrap();
    assert_eq!(a.spdx_id, spdx_id("a.ts"));
    assert_ne!(a.spdx_id, b.spdx_id);
    assert_eq!(a.checksums, b.checksums);

    fs::write(dir.path().join("a.ts"), "// changed\n").unwrap();
    let changed = resolver.resolve("a.ts").unwrap();
    assert_eq!(changed.spdx_id, a.spdx_id);
    assert_ne!(changed.checksums, a.checksums);
}

// ═══════════════════════════════════════════════════════════════════
// Section 3: Merge semantics
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_precedence_embedded_sidecar_config() {
    let dep5 = "Format: x\n\nFiles: *\nCopyright: Config\nLicense: MIT\n";
    let dir = project(&[
        (".reuse/dep5", dep5),
        ("src/a.ts", "// SPDX-FileCopyrightText: Embedded\n"),
        ("src/a.ts.license", "SPDX-FileCopyrightText: Sidecar\n"),
    ]);

    let file = Resolver::new(dir.path()).resolve("src/a.ts").unwrap();
    assert_eq!(file.copyright_text.as_deref(), Some("Embedded"));
}

#[test]
fn test_sentinel_until_first_license() {
    let dir = project(&[
        ("none.ts", "// SPDX-FileCopyrightText: 2023 Jane\n"),
        ("some.ts", "// SPDX-LicenseInfoInFile: MIT\n// SPDX-License-Identifier: NOASSERTION\n"),
    ]);
    let resolver = Resolver::new(dir.path());

    assert_eq!(resolver.resolve("none.ts").unwrap().license_info_in_files, vec![NOASSERTION]);

    let some = resolver.resolve("some.ts").unwrap();
    assert_eq!(some.license_info_in_files, vec!["MIT"]);
    assert!(!some.has_no_license());
}

#[test]
fn test_contributors_in_source_order() {
    let dir = project(&[(
        "lib.py",
        "# SPDX-FileContributor: First\n# unrelated prose\n# SPDX-FileContributor: Second\n",
    )]);

    let file = Resolver::new(dir.path()).resolve("lib.py").unwrap();
    assert_eq!(file.file_contributors, vec!["First", "Second"]);
}

#[test]
fn test_missing_config_equals_no_config() {
    let with_dep5_elsewhere = project(&[
        ("src/minimal-file.ts", MINIMAL_FILE),
        ("debian/copyright", DEP5),
    ]);
    let bare = project(&[("src/minimal-file.ts", MINIMAL_FILE)]);

    let a = Resolver::new(with_dep5_elsewhere.path()).resolve("src/minimal-file.ts").unwrap();
    let b = Resolver::new(bare.path()).resolve("src/minimal-file.ts").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_package_config_fills_missing_info() {
    let dir = project(&[
        (".reuse/dep5", DEP5),
        ("src/missing-info.ts", "export const x = 1;\n"),
        ("src/other.ts", "export const y = 2;\n"),
    ]);
    let resolver = Resolver::new(dir.path());

    let stanza = resolver.resolve("src/missing-info.ts").unwrap();
    assert_eq!(stanza.copyright_text.as_deref(), Some("2022 Config Holder"));
    assert_eq!(stanza.license_info_in_files, vec!["ISC"]);

    let header = resolver.resolve("src/other.ts").unwrap();
    assert_eq!(header.copyright_text.as_deref(), Some("2020 Project Authors"));
    assert_eq!(header.license_info_in_files, vec!["BSD-3-Clause"]);
}

#[test]
fn test_sidecar_for_binary_asset() {
    let dir = project(&[
        ("img/logo.png", "\u{89}PNG\r\n"),
        (
            "img/logo.png.license",
            "SPDX-FileCopyrightText: 2023 Designer\nSPDX-License-Identifier: CC-BY-4.0\n",
        ),
    ]);

    let mut doc = document(&dir);
    doc.add_files(["img/logo.png", "img/logo.png.license"]).unwrap();
    assert_eq!(doc.files.len(), 1);
    assert_eq!(doc.files[0].copyright_text.as_deref(), Some("2023 Designer"));
    assert_eq!(doc.files[0].license_info_in_files, vec!["CC-BY-4.0"]);
}

#[test]
fn test_unsupported_syntax_fallback() {
    let dir = project(&[(
        "data/table.csv",
        "id,name\n1,alpha\nSPDX-FileCopyrightText: 2023 Data Team\n",
    )]);

    let file = Resolver::new(dir.path()).resolve("data/table.csv").unwrap();
    assert_eq!(file.copyright_text.as_deref(), Some("2023 Data Team"));
}

// ═══════════════════════════════════════════════════════════════════
// Section 4: Batches
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_batch_order_and_duplicates() {
    let dir = project(&[("a.ts", MINIMAL_FILE), ("b.ts", FULL_FILE)]);
    let mut doc = document(&dir);
    doc.add_files(["b.ts", "a.ts", "b.ts"]).unwrap();

    let names: Vec<&str> = doc.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["./b.ts", "./a.ts", "./b.ts"]);

    let related: Vec<&str> = doc
        .relationships
        .iter()
        .map(|r| r.related_spdx_element.as_str())
        .collect();
    let ids: Vec<&str> = doc.files.iter().map(|f| f.spdx_id.as_str()).collect();
    assert_eq!(related, ids);
}

#[test]
fn test_batch_failure_keeps_earlier_records() {
    let dir = project(&[("a.ts", MINIMAL_FILE)]);
    let mut doc = document(&dir);

    let err = doc.add_files(["a.ts", "gone.ts"]).unwrap_err();
    assert!(matches!(err, ReuseError::Io(_)));
    assert_eq!(doc.files.len(), 1);
    assert_eq!(doc.relationships.len(), 1);
}

#[test]
fn test_malformed_package_config_aborts_batch() {
    let dir = project(&[(".reuse/dep5", "Format x\n"), ("a.ts", MINIMAL_FILE)]);
    let mut doc = document(&dir);

    let err = doc.add_files(["a.ts"]).unwrap_err();
    assert!(matches!(err, ReuseError::MalformedConfiguration { .. }));
    assert!(doc.files.is_empty());
}
