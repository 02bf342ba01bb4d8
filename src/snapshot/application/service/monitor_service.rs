use crate::{
    OsnapError, OsnapResult,
    core::domain::{
        gateway::SnapshotGateway,
        model::{
            policy::PollPolicy,
            snapshot::{CreatedSnapshot, SnapshotStatus},
            vm::Vm,
        },
        sleeper::Sleeper,
    },
};
use std::time::Duration;
use tracing::{debug, error, info};

/// Progress of a single snapshot job as seen by the monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Accepted by the engine, not checked yet.
    Created,
    /// Last check reported a non-terminal status.
    Pending(String),
    Succeeded,
    Failed(String),
}

impl PollState {
    /// Applies an observed status. Terminal states never change.
    pub fn advance(self, status: SnapshotStatus) -> Self {
        if self.is_terminal() {
            return self;
        }

        match status {
            SnapshotStatus::Ok => PollState::Succeeded,
            SnapshotStatus::Failed(raw) => PollState::Failed(raw),
            SnapshotStatus::Pending(raw) => PollState::Pending(raw),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PollState::Succeeded | PollState::Failed(_))
    }
}

/// Waits for freshly created snapshots to finish, one after another.
pub struct MonitorService<'a, G: SnapshotGateway + ?Sized, S: Sleeper + ?Sized> {
    gateway: &'a G,
    sleeper: &'a S,
    policy: PollPolicy,
}

impl<'a, G, S> MonitorService<'a, G, S>
where
    G: SnapshotGateway + ?Sized,
    S: Sleeper + ?Sized,
{
    pub fn new(gateway: &'a G, sleeper: &'a S, policy: PollPolicy) -> Self {
        Self {
            gateway,
            sleeper,
            policy,
        }
    }

    /// Returns the VMs whose snapshot completed successfully, in the order
    /// the snapshots were given.
    pub async fn execute(&self, created: Vec<CreatedSnapshot>) -> Vec<Vm> {
        let mut completed = Vec::with_capacity(created.len());

        for snapshot in created {
            match self.wait_for_completion(&snapshot).await {
                Ok(()) => {
                    info!(vm = %snapshot.vm.name, "Snapshot completed");
                    completed.push(snapshot.vm);
                }
                Err(e) => error!(vm = %snapshot.vm.name, error = %e, "Snapshot failed"),
            }
        }

        completed
    }

    /// Polls one snapshot until it succeeds, fails, or the timeout elapses.
    ///
    /// The first check happens right away; later checks are spaced by the
    /// poll interval.
    pub async fn wait_for_completion(&self, created: &CreatedSnapshot) -> OsnapResult<()> {
        info!(vm = %created.vm.name, snapshot = %created.snapshot_id, "Waiting for snapshot to finish");

        let mut state = PollState::Created;
        let mut waited = Duration::ZERO;

        loop {
            let snapshot = self
                .gateway
                .get_snapshot(&created.vm.id, &created.snapshot_id)
                .await?;
            state = state.advance(snapshot.status());

            match &state {
                PollState::Succeeded => return Ok(()),
                PollState::Failed(status) => return Err(OsnapError::SnapshotFailed(status.clone())),
                PollState::Pending(status) => {
                    debug!(vm = %created.vm.name, status = %status, "Snapshot still in progress");
                }
                PollState::Created => {}
            }

            if self.policy.timeout.is_some_and(|timeout| waited >= timeout) {
                return Err(OsnapError::SnapshotTimeout {
                    snapshot: created.snapshot_id.clone(),
                    waited,
                });
            }

            self.sleeper.sleep(self.policy.interval).await;
            waited += self.policy.interval;
        }
    }
}
