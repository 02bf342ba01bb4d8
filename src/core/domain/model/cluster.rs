use serde::{Deserialize, Serialize};

/// A cluster as returned by the `clusters?search=` endpoint.
///
/// Used only to translate the configured cluster name into an id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cluster {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Cluster {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
