//! Domain models for VM snapshots.
//!
//! Snapshots created by this tool are recognised solely by the marker
//! suffix appended to their description. Any snapshot without it belongs
//! to someone else and is never touched by retention.

use super::{resource_ref::ResourceRef, vm::Vm};
use serde::{Deserialize, Serialize};

/// Suffix appended to the description of every snapshot osnap creates.
pub const SNAPSHOT_MARKER: &str = " - created by oSnap";

/// Builds the description of an owned snapshot.
pub fn owned_description(description: &str) -> String {
    format!("{}{}", description, SNAPSHOT_MARKER)
}

/// A snapshot as returned by the `vms/{id}/snapshots` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Snapshot {
    /// Identifier assigned by the engine once the job is accepted.
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Free text description, possibly ending in [`SNAPSHOT_MARKER`].
    #[serde(default)]
    pub description: String,
    /// Whether the memory state is part of the snapshot.
    #[serde(default)]
    pub persist_memorystate: bool,
    /// Raw status string (`locked`, `ok`, `failed`, ...).
    #[serde(
        rename = "snapshot_status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    /// The VM the snapshot belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm: Option<ResourceRef>,
}

impl Snapshot {
    /// Returns true if this snapshot was created by osnap.
    pub fn is_owned(&self) -> bool {
        self.description.ends_with(SNAPSHOT_MARKER)
    }

    /// Classifies the raw status string.
    pub fn status(&self) -> SnapshotStatus {
        SnapshotStatus::parse(self.status.as_deref().unwrap_or_default())
    }

    /// Returns the snapshot id, or an empty string while it is unassigned.
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// Typed classification of a snapshot status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// The snapshot is complete.
    Ok,
    /// The engine gave up; carries the raw status.
    Failed(String),
    /// Anything else: the job is still running (`locked`, `in_preview`, ...).
    Pending(String),
}

impl SnapshotStatus {
    pub fn parse(raw: &str) -> Self {
        if raw == "ok" {
            SnapshotStatus::Ok
        } else if raw.starts_with("fail") || raw.starts_with("error") {
            SnapshotStatus::Failed(raw.to_string())
        } else {
            SnapshotStatus::Pending(raw.to_string())
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SnapshotStatus::Pending(_))
    }
}

/// A snapshot job accepted by the engine, together with the VM it was
/// requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSnapshot {
    pub vm: Vm,
    pub snapshot_id: String,
}
