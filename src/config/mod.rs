//! YAML configuration.
//!
//! ```yaml
//! keep: 3
//! description: Nightly
//! cluster: my-cluster
//! includes: ["web.*"]
//! excludes: ["db.*"]
//! api:
//!   url: https://engine.example.com/ovirt-engine/api
//!   user: admin@internal
//!   password: secret
//!   insecure: false
//! ```

use crate::{
    ApiConnection, ApiPassword, ApiUrl, ApiUsername, OsnapError, OsnapResult, ValidationError,
    core::domain::model::policy::{
        DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT, DEFAULT_RESERVED,
        DEFAULT_RETRY_DELAY, PollPolicy, RetentionPolicy, RetryPolicy,
    },
    snapshot::application::service::{run_service::RunSettings, selection_service::VmFilter},
};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path, time::Duration};

/// Top level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Owned snapshots to keep per VM on top of the most recent one.
    #[serde(default)]
    pub keep: usize,
    /// Description of new snapshots; the ownership marker is appended.
    #[serde(default)]
    pub description: String,
    /// Only VMs of this cluster are processed. Empty means all clusters.
    #[serde(default)]
    pub cluster: String,
    pub api: ApiConfig,
    /// VM name patterns to process. Empty means all VMs.
    #[serde(default)]
    pub includes: Vec<String>,
    /// VM name patterns to skip. Excludes win over includes.
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// `null` waits for snapshots without limit.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: Option<u64>,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    #[serde(default = "default_max_delete_attempts")]
    pub max_delete_attempts: u32,
    /// Owned snapshots kept in addition to `keep`.
    #[serde(default = "default_reserved")]
    pub reserved: usize,
}

/// Settings to communicate with the oVirt API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    /// Accept self-signed or otherwise invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

/// Client side request rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_poll_timeout_secs() -> Option<u64> {
    Some(DEFAULT_POLL_TIMEOUT.as_secs())
}

fn default_retry_delay_secs() -> u64 {
    DEFAULT_RETRY_DELAY.as_secs()
}

fn default_max_delete_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_reserved() -> usize {
    DEFAULT_RESERVED
}

impl Config {
    /// Reads the configuration from a YAML document.
    pub fn load<R: Read>(reader: R) -> OsnapResult<Self> {
        serde_yaml::from_reader(reader)
            .map_err(|e| OsnapError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Reads the configuration from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> OsnapResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            OsnapError::Config(format!("Could not open {}: {}", path.display(), e))
        })?;
        Self::load(file)
    }

    /// Validates the API section and returns the connection details.
    pub fn connection(&self) -> OsnapResult<ApiConnection> {
        Ok(ApiConnection::new(
            ApiUrl::new(&self.api.url)?,
            ApiUsername::new(self.api.user.as_str())?,
            ApiPassword::new(self.api.password.as_str())?,
            self.api.insecure,
        ))
    }

    /// Validates the lifecycle section and returns the run settings.
    pub fn run_settings(&self) -> OsnapResult<RunSettings> {
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::Field {
                field: "poll_interval_secs".to_string(),
                message: "Poll interval must be at least one second".to_string(),
            }
            .into());
        }

        if self.max_delete_attempts == 0 {
            return Err(ValidationError::Field {
                field: "max_delete_attempts".to_string(),
                message: "At least one delete attempt is required".to_string(),
            }
            .into());
        }

        let filter = VmFilter::from_patterns(&self.cluster, &self.includes, &self.excludes)?;

        Ok(RunSettings {
            filter,
            description: self.description.clone(),
            retention: RetentionPolicy::new(self.keep).with_reserved(self.reserved),
            poll: PollPolicy {
                interval: Duration::from_secs(self.poll_interval_secs),
                timeout: self.poll_timeout_secs.map(Duration::from_secs),
            },
            retry: RetryPolicy {
                max_attempts: self.max_delete_attempts,
                delay: Duration::from_secs(self.retry_delay_secs),
            },
        })
    }
}
