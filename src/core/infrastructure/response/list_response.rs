//! Collection envelopes returned by the list endpoints.
//!
//! oVirt wraps collections in a plural root element (`<vms>`, `<clusters>`,
//! `<snapshots>`) with one child element per item. An empty collection may
//! be rendered as a self-closing root, hence the `default` on every field.

use crate::core::domain::model::{cluster::Cluster, snapshot::Snapshot, vm::Vm};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct VmsResponse {
    #[serde(rename = "vm", default)]
    pub vms: Vec<Vm>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClustersResponse {
    #[serde(rename = "cluster", default)]
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotsResponse {
    #[serde(rename = "snapshot", default)]
    pub snapshots: Vec<Snapshot>,
}
