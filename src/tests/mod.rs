mod resources;

use crate::{
    ApiConnection, ApiPassword, ApiUrl, ApiUsername, OsnapResult,
    core::{
        domain::sleeper::Sleeper,
        infrastructure::{api_client::ApiClient, ovirt_gateway::OvirtGateway},
    },
};
use async_trait::async_trait;
use std::{sync::Mutex, time::Duration};

/// Sleeper that returns immediately and remembers every requested delay.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

/// Connection pointing at a mock server, with fixed test credentials.
pub fn test_connection(server_uri: &str) -> ApiConnection {
    ApiConnection::new(
        ApiUrl::new(&format!("{}/ovirt-engine/api", server_uri)).unwrap(),
        ApiUsername::new("admin@internal").unwrap(),
        ApiPassword::new("secret").unwrap(),
        false,
    )
}

pub fn test_gateway(server_uri: &str) -> OsnapResult<OvirtGateway> {
    Ok(OvirtGateway::new(ApiClient::new(
        test_connection(server_uri),
        None,
    )?))
}
