use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current run between polls and retries.
///
/// Production code sleeps on the tokio timer; tests substitute an
/// implementation that returns immediately and records the requested delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
