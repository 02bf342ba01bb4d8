use crate::{
    OsnapResult,
    core::domain::{
        gateway::SnapshotGateway,
        model::policy::{PollPolicy, RetentionPolicy, RetryPolicy},
        sleeper::Sleeper,
    },
    snapshot::application::service::{
        creation_service::CreationService, monitor_service::MonitorService,
        retention_service::RetentionService,
        selection_service::{SelectionService, VmFilter},
    },
};
use tracing::{info, warn};

/// Everything a run needs besides the gateway.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub filter: VmFilter,
    /// Operator description, without the ownership marker.
    pub description: String,
    pub retention: RetentionPolicy,
    pub poll: PollPolicy,
    pub retry: RetryPolicy,
}

/// What a run does with the selected VMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Create, wait, then purge the VMs whose snapshot succeeded.
    Snapshot,
    /// Purge every selected VM without creating anything.
    PurgeOnly,
    /// Log the selection and create nothing, delete nothing.
    Dry,
}

impl RunMode {
    /// Picks the mode from command line switches. `dry` wins over
    /// `purge_only`.
    pub fn from_flags(purge_only: bool, dry: bool) -> Self {
        match (dry, purge_only) {
            (true, _) => RunMode::Dry,
            (false, true) => RunMode::PurgeOnly,
            (false, false) => RunMode::Snapshot,
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub selected: usize,
    pub succeeded: usize,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.succeeded == self.selected
    }
}

/// Runs one lifecycle pass: select, create, monitor, purge.
pub struct RunService<'a, G: SnapshotGateway + ?Sized, S: Sleeper + ?Sized> {
    gateway: &'a G,
    sleeper: &'a S,
    settings: &'a RunSettings,
}

impl<'a, G, S> RunService<'a, G, S>
where
    G: SnapshotGateway + ?Sized,
    S: Sleeper + ?Sized,
{
    pub fn new(gateway: &'a G, sleeper: &'a S, settings: &'a RunSettings) -> Self {
        Self {
            gateway,
            sleeper,
            settings,
        }
    }

    /// Executes the run.
    ///
    /// Per VM failures are logged and reflected in the report. Only a failed
    /// selection aborts the run with an error.
    pub async fn execute(&self, mode: RunMode) -> OsnapResult<RunReport> {
        let vms = SelectionService::new(self.gateway)
            .execute(&self.settings.filter)
            .await?;
        let selected = vms.len();

        let retention = RetentionService::new(
            self.gateway,
            self.sleeper,
            self.settings.retention,
            self.settings.retry,
        );

        let succeeded = match mode {
            RunMode::Dry => {
                CreationService::new(self.gateway, &self.settings.description).dry_run(&vms);
                selected
            }
            RunMode::PurgeOnly => retention.execute(&vms).await,
            RunMode::Snapshot => {
                let created = CreationService::new(self.gateway, &self.settings.description)
                    .execute(&vms)
                    .await;
                let completed = MonitorService::new(self.gateway, self.sleeper, self.settings.poll)
                    .execute(created)
                    .await;
                retention.execute(&completed).await
            }
        };

        let report = RunReport {
            selected,
            succeeded,
        };
        if report.is_success() {
            info!(succeeded, selected, "Run finished");
        } else {
            warn!(succeeded, selected, "Run finished with failures");
        }

        Ok(report)
    }
}
