use serde::{Deserialize, Serialize};

/// A link to another API resource, rendered by oVirt as an empty element
/// carrying the target id (e.g. `<cluster href="..." id="..."/>`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceRef {
    /// Identifier of the referenced resource.
    #[serde(rename = "@id")]
    pub id: String,
}

impl ResourceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
