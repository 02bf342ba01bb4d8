pub mod create_snapshot_request;
