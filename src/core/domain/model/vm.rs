//! Domain model for virtual machines.
//!
//! Only the fields the snapshot lifecycle reads are modelled; everything
//! else in the `/vms` payload is ignored during deserialization.

use super::resource_ref::ResourceRef;
use serde::{Deserialize, Serialize};

/// A virtual machine as returned by the `vms` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Vm {
    /// Opaque VM identifier assigned by the engine.
    #[serde(rename = "@id")]
    pub id: String,
    /// Human-readable name, matched against include/exclude patterns.
    #[serde(default)]
    pub name: String,
    /// The cluster the VM belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ResourceRef>,
}

impl Vm {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cluster: Some(ResourceRef::new(cluster_id)),
        }
    }

    /// Returns the id of the owning cluster, if the API reported one.
    pub fn cluster_id(&self) -> Option<&str> {
        self.cluster.as_ref().map(|c| c.id.as_str())
    }
}
