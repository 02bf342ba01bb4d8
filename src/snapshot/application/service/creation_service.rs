use crate::{
    OsnapError, OsnapResult,
    core::domain::{
        gateway::SnapshotGateway,
        model::{
            snapshot::{CreatedSnapshot, owned_description},
            vm::Vm,
        },
    },
};
use tracing::{error, info};

/// Requests one disk-only snapshot per VM.
pub struct CreationService<'a, G: SnapshotGateway + ?Sized> {
    gateway: &'a G,
    description: String,
}

impl<'a, G: SnapshotGateway + ?Sized> CreationService<'a, G> {
    /// `description` is the operator supplied text; the ownership marker is
    /// appended here.
    pub fn new(gateway: &'a G, description: &str) -> Self {
        Self {
            gateway,
            description: owned_description(description),
        }
    }

    /// Requests snapshots for all VMs, in order.
    ///
    /// A rejected request is logged and the VM is left out of the result;
    /// the remaining VMs are still processed.
    pub async fn execute(&self, vms: &[Vm]) -> Vec<CreatedSnapshot> {
        let mut created = Vec::with_capacity(vms.len());

        for vm in vms {
            info!(vm = %vm.name, "Creating snapshot for VM");
            match self.create(vm).await {
                Ok(snapshot) => {
                    info!(vm = %vm.name, snapshot = %snapshot.snapshot_id, "Snapshot job created");
                    created.push(snapshot);
                }
                Err(e) => error!(vm = %vm.name, error = %e, "Snapshot failed"),
            }
        }

        created
    }

    /// Logs what `execute` would do without contacting the API.
    pub fn dry_run(&self, vms: &[Vm]) {
        for vm in vms {
            info!(vm = %vm.name, description = %self.description, "Dry run: would create snapshot for VM");
        }
    }

    async fn create(&self, vm: &Vm) -> OsnapResult<CreatedSnapshot> {
        let snapshot = self
            .gateway
            .create_snapshot(&vm.id, &self.description)
            .await?;

        let snapshot_id = snapshot
            .id
            .ok_or_else(|| OsnapError::MissingSnapshotId {
                vm: vm.name.clone(),
            })?;

        Ok(CreatedSnapshot {
            vm: vm.clone(),
            snapshot_id,
        })
    }
}
