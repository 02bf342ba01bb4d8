pub mod api_connection;
pub mod cluster;
pub mod policy;
pub mod resource_ref;
pub mod snapshot;
pub mod vm;
