use crate::{
    OsnapError, OsnapResult,
    core::domain::{
        gateway::SnapshotGateway,
        model::{
            policy::{RetentionPolicy, RetryPolicy},
            vm::Vm,
        },
        sleeper::Sleeper,
    },
};
use tracing::{error, info, warn};

/// Deletes the oldest owned snapshots beyond the retention count.
pub struct RetentionService<'a, G: SnapshotGateway + ?Sized, S: Sleeper + ?Sized> {
    gateway: &'a G,
    sleeper: &'a S,
    retention: RetentionPolicy,
    retry: RetryPolicy,
}

impl<'a, G, S> RetentionService<'a, G, S>
where
    G: SnapshotGateway + ?Sized,
    S: Sleeper + ?Sized,
{
    pub fn new(gateway: &'a G, sleeper: &'a S, retention: RetentionPolicy, retry: RetryPolicy) -> Self {
        Self {
            gateway,
            sleeper,
            retention,
            retry,
        }
    }

    /// Purges every VM and returns how many were purged without error.
    pub async fn execute(&self, vms: &[Vm]) -> usize {
        let mut success = 0;

        for vm in vms {
            match self.purge_vm(vm).await {
                Ok(_) => success += 1,
                Err(e) => error!(vm = %vm.name, error = %e, "Purging failed"),
            }
        }

        success
    }

    /// Purges one VM and returns the number of deleted snapshots.
    ///
    /// Snapshots are deleted oldest first, in the order the API lists them.
    /// The first delete that fails for a reason other than a conflict stops
    /// the purge of this VM.
    pub async fn purge_vm(&self, vm: &Vm) -> OsnapResult<usize> {
        info!(vm = %vm.name, "Purging old snapshots");

        let owned: Vec<String> = self
            .gateway
            .list_snapshots(&vm.id)
            .await?
            .into_iter()
            .filter(|s| s.is_owned())
            .filter_map(|s| s.id)
            .collect();

        let excess = self.retention.purge_count(owned.len());
        if excess < 1 {
            info!(vm = %vm.name, owned = owned.len(), "Nothing to purge");
            return Ok(0);
        }

        info!(vm = %vm.name, count = excess, "Purging old snapshots");
        for snapshot_id in &owned[..excess] {
            self.delete_with_retry(vm, snapshot_id).await?;
        }

        Ok(excess)
    }

    async fn delete_with_retry(&self, vm: &Vm, snapshot_id: &str) -> OsnapResult<()> {
        info!(vm = %vm.name, snapshot = %snapshot_id, "Deleting snapshot");

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.gateway.delete_snapshot(&vm.id, snapshot_id).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_conflict() => {
                    if attempt >= self.retry.max_attempts {
                        return Err(OsnapError::MaxRetriesReached { attempts: attempt });
                    }
                    warn!(
                        vm = %vm.name,
                        snapshot = %snapshot_id,
                        attempt,
                        delay = ?self.retry.delay,
                        "Conflict occurred, retrying"
                    );
                    self.sleeper.sleep(self.retry.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
