use serde::Serialize;

/// Body of `POST vms/{id}/snapshots`.
#[derive(Debug, Serialize)]
#[serde(rename = "snapshot")]
pub struct CreateSnapshotRequest {
    pub description: String,
    pub persist_memorystate: bool,
}

impl CreateSnapshotRequest {
    /// A disk-only snapshot request.
    pub fn disk_only(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            persist_memorystate: false,
        }
    }
}
