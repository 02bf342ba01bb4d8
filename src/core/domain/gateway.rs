//! The boundary between the snapshot lifecycle and the remote API.

use crate::core::domain::{
    error::OsnapResult,
    model::{cluster::Cluster, snapshot::Snapshot, vm::Vm},
};
use async_trait::async_trait;

/// Remote operations the snapshot lifecycle depends on.
///
/// Implementations classify failures once: HTTP statuses become
/// [`OsnapError::Api`](crate::OsnapError::Api) with an
/// [`ApiErrorKind`](crate::ApiErrorKind), transport problems become
/// [`OsnapError::Connection`](crate::OsnapError::Connection).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotGateway: Send + Sync {
    /// Lists the full VM inventory.
    async fn list_vms(&self) -> OsnapResult<Vec<Vm>>;

    /// Searches clusters by name. The result may contain partial matches.
    async fn search_clusters(&self, name: &str) -> OsnapResult<Vec<Cluster>>;

    /// Requests a disk-only snapshot with the given (full) description.
    async fn create_snapshot(&self, vm_id: &str, description: &str) -> OsnapResult<Snapshot>;

    /// Fetches the current state of a snapshot.
    async fn get_snapshot(&self, vm_id: &str, snapshot_id: &str) -> OsnapResult<Snapshot>;

    /// Lists all snapshots of a VM, oldest first.
    async fn list_snapshots(&self, vm_id: &str) -> OsnapResult<Vec<Snapshot>>;

    /// Deletes a snapshot.
    async fn delete_snapshot(&self, vm_id: &str, snapshot_id: &str) -> OsnapResult<()>;
}
