//! SPDX 2.3 document model — files, relationships, and the document itself

pub mod document;
pub mod file;
pub mod relationship;

pub use document::{CreationInfo, SoftwareBillOfMaterials};
pub use file::{normalize_path, spdx_id, Checksum, ChecksumAlgorithm, FileType, SpdxFile};
pub use relationship::{Relationship, RelationshipType};
