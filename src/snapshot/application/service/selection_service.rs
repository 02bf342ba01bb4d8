use crate::{
    OsnapError, OsnapResult,
    core::domain::{gateway::SnapshotGateway, model::vm::Vm},
};
use regex::Regex;
use tracing::{debug, info};

/// Which VMs a run acts on.
#[derive(Debug, Clone, Default)]
pub struct VmFilter {
    cluster: Option<String>,
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
}

impl VmFilter {
    /// An empty `cluster` disables the cluster test.
    pub fn new(cluster: impl Into<String>, includes: Vec<Regex>, excludes: Vec<Regex>) -> Self {
        let cluster = cluster.into();
        Self {
            cluster: (!cluster.is_empty()).then_some(cluster),
            includes,
            excludes,
        }
    }

    /// Compiles include and exclude patterns.
    ///
    /// # Errors
    /// Returns `OsnapError::Config` naming the first invalid pattern.
    pub fn from_patterns(
        cluster: &str,
        includes: &[String],
        excludes: &[String],
    ) -> OsnapResult<Self> {
        Ok(Self::new(
            cluster,
            compile("include", includes)?,
            compile("exclude", excludes)?,
        ))
    }

    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    /// Name test: excludes win, then includes, and an empty include list
    /// admits everything.
    pub fn matches_name(&self, name: &str) -> bool {
        if self.excludes.iter().any(|r| r.is_match(name)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|r| r.is_match(name))
    }

    /// Full selection test against an already resolved cluster id.
    pub fn matches(&self, vm: &Vm, cluster_id: Option<&str>) -> bool {
        let in_cluster = match cluster_id {
            None => true,
            Some(id) => vm.cluster_id() == Some(id),
        };
        in_cluster && self.matches_name(&vm.name)
    }
}

fn compile(kind: &str, patterns: &[String]) -> OsnapResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| {
                OsnapError::Config(format!("Invalid {} pattern '{}': {}", kind, p, e))
            })
        })
        .collect()
}

/// Resolves the target VM set of a run.
pub struct SelectionService<'a, G: SnapshotGateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: SnapshotGateway + ?Sized> SelectionService<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Fetches the inventory and returns the VMs matching `filter`, in
    /// inventory order.
    ///
    /// # Errors
    /// Fails if the cluster filter cannot be resolved or the inventory
    /// cannot be fetched. Both abort the run.
    pub async fn execute(&self, filter: &VmFilter) -> OsnapResult<Vec<Vm>> {
        let cluster_id = match filter.cluster() {
            Some(name) => Some(self.resolve_cluster(name).await?),
            None => None,
        };

        let inventory = self.gateway.list_vms().await?;
        let total = inventory.len();

        let selected: Vec<Vm> = inventory
            .into_iter()
            .filter(|vm| {
                let keep = filter.matches(vm, cluster_id.as_deref());
                if !keep {
                    debug!(vm = %vm.name, "Skipping VM");
                }
                keep
            })
            .collect();

        info!(selected = selected.len(), total, "Selected VMs");
        Ok(selected)
    }

    async fn resolve_cluster(&self, name: &str) -> OsnapResult<String> {
        self.gateway
            .search_clusters(name)
            .await?
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .ok_or_else(|| OsnapError::ClusterNotFound(name.to_string()))
    }
}
