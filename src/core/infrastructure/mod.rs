pub mod api_client;
pub mod ovirt_gateway;
pub mod request;
pub mod response;
pub mod tokio_sleeper;
