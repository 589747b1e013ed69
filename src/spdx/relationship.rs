//! SPDX relationships between document elements

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipType {
    #[serde(rename = "DESCRIBES")]
    Describes,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Describes => write!(f, "DESCRIBES"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub spdx_element_id: String,
    pub relationship_type: RelationshipType,
    pub related_spdx_element: String,
}

impl Relationship {
    /// `element` DESCRIBES `related`
    pub fn describes(element: &str, related: &str) -> Self {
        Self {
            spdx_element_id: element.to_string(),
            relationship_type: RelationshipType::Describes,
            related_spdx_element: related.to_string(),
        }
    }
}
