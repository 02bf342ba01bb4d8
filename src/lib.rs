mod config;
mod core;
mod snapshot;

#[cfg(test)]
mod tests;

pub use crate::config::{ApiConfig, Config, RateLimitConfig};
pub use crate::core::domain::{
    error::{ApiErrorKind, OsnapError, OsnapResult, ValidationError},
    gateway::SnapshotGateway,
    model::{
        api_connection::ApiConnection,
        cluster::Cluster,
        policy::{PollPolicy, RetentionPolicy, RetryPolicy},
        resource_ref::ResourceRef,
        snapshot::{CreatedSnapshot, SNAPSHOT_MARKER, Snapshot, SnapshotStatus},
        vm::Vm,
    },
    sleeper::Sleeper,
    value_object::{ApiPassword, ApiUrl, ApiUsername},
};
pub use crate::core::infrastructure::tokio_sleeper::TokioSleeper;
pub use crate::snapshot::application::service::{
    monitor_service::PollState,
    run_service::{RunMode, RunReport, RunSettings},
    selection_service::VmFilter,
};

use crate::{
    core::infrastructure::{api_client::ApiClient, ovirt_gateway::OvirtGateway},
    snapshot::application::service::run_service::RunService,
};

/// A client that drives the snapshot lifecycle against an oVirt engine
///
/// One run of the client:
/// - Selects VMs by cluster and name patterns
/// - Requests a disk-only snapshot per VM and waits for it to finish
/// - Deletes the oldest snapshots it owns beyond the retention count
///
/// # Examples
///
/// ```no_run
/// use osnap::{Config, OsnapClient, OsnapResult, RunMode};
///
/// #[tokio::main]
/// async fn main() -> OsnapResult<()> {
///     let config = Config::from_path("config.yml")?;
///     let settings = config.run_settings()?;
///
///     let client = OsnapClient::from_config(&config)?;
///     let report = client.run(&settings, RunMode::Snapshot).await?;
///
///     println!("{}/{} VMs processed", report.succeeded, report.selected);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct OsnapClient {
    gateway: OvirtGateway,
}

impl OsnapClient {
    /// Creates a client for the given connection.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The HTTP client cannot be initialized
    /// - The rate limit has a zero component
    pub fn new(connection: ApiConnection, rate_limit: Option<RateLimitConfig>) -> OsnapResult<Self> {
        let api_client = ApiClient::new(connection, rate_limit)?;
        Ok(Self {
            gateway: OvirtGateway::new(api_client),
        })
    }

    /// Creates a client from the `api` section of a configuration.
    pub fn from_config(config: &Config) -> OsnapResult<Self> {
        Self::new(config.connection()?, config.api.rate_limit)
    }

    /// Returns the API base URL this client talks to
    pub fn url(&self) -> &ApiUrl {
        self.gateway.connection().url()
    }

    /// Executes one lifecycle run
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` once every selected VM was handled, successfully or not
    /// * `Err(OsnapError)` if the VM selection itself failed
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The cluster filter names an unknown cluster
    /// - The VM inventory cannot be fetched
    pub async fn run(&self, settings: &RunSettings, mode: RunMode) -> OsnapResult<RunReport> {
        let sleeper = TokioSleeper;
        RunService::new(&self.gateway, &sleeper, settings)
            .execute(mode)
            .await
    }
}
