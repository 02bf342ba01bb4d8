pub mod creation_service;
pub mod monitor_service;
pub mod retention_service;
pub mod run_service;
pub mod selection_service;
