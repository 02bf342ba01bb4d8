//! [`SnapshotGateway`] implementation backed by the oVirt REST API.

use crate::core::{
    domain::{
        error::OsnapResult,
        gateway::SnapshotGateway,
        model::{api_connection::ApiConnection, cluster::Cluster, snapshot::Snapshot, vm::Vm},
    },
    infrastructure::{
        api_client::ApiClient,
        request::create_snapshot_request::CreateSnapshotRequest,
        response::list_response::{ClustersResponse, SnapshotsResponse, VmsResponse},
    },
};
use async_trait::async_trait;

#[derive(Debug)]
pub struct OvirtGateway {
    api_client: ApiClient,
}

impl OvirtGateway {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    pub fn connection(&self) -> &ApiConnection {
        self.api_client.connection()
    }
}

#[async_trait]
impl SnapshotGateway for OvirtGateway {
    async fn list_vms(&self) -> OsnapResult<Vec<Vm>> {
        let response: VmsResponse = self.api_client.get("vms").await?;
        Ok(response.vms)
    }

    async fn search_clusters(&self, name: &str) -> OsnapResult<Vec<Cluster>> {
        let response: ClustersResponse = self
            .api_client
            .get_with_query("clusters", &[("search", name)])
            .await?;
        Ok(response.clusters)
    }

    async fn create_snapshot(&self, vm_id: &str, description: &str) -> OsnapResult<Snapshot> {
        let request = CreateSnapshotRequest::disk_only(description);
        self.api_client
            .post(&format!("vms/{}/snapshots", vm_id), &request)
            .await
    }

    async fn get_snapshot(&self, vm_id: &str, snapshot_id: &str) -> OsnapResult<Snapshot> {
        self.api_client
            .get(&format!("vms/{}/snapshots/{}", vm_id, snapshot_id))
            .await
    }

    async fn list_snapshots(&self, vm_id: &str) -> OsnapResult<Vec<Snapshot>> {
        let response: SnapshotsResponse = self
            .api_client
            .get(&format!("vms/{}/snapshots", vm_id))
            .await?;
        Ok(response.snapshots)
    }

    async fn delete_snapshot(&self, vm_id: &str, snapshot_id: &str) -> OsnapResult<()> {
        self.api_client
            .delete(&format!("vms/{}/snapshots/{}", vm_id, snapshot_id))
            .await
    }
}
