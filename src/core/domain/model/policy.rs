//! Timing and retention parameters of a run.

use std::time::Duration;

/// Default delay between two status checks of the same snapshot.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
/// Default upper bound for waiting on a single snapshot.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(4 * 60 * 60);
/// Default delay before retrying a delete that hit a conflict.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);
/// Default number of delete attempts per snapshot.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
/// Default number of owned snapshots kept on top of `keep`.
pub const DEFAULT_RESERVED: usize = 1;

/// How many owned snapshots survive a purge.
///
/// A VM keeps `keep + reserved` owned snapshots. `reserved` accounts for
/// the most recent snapshot, which `keep` does not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub keep: usize,
    pub reserved: usize,
}

impl RetentionPolicy {
    pub fn new(keep: usize) -> Self {
        Self {
            keep,
            reserved: DEFAULT_RESERVED,
        }
    }

    pub fn with_reserved(mut self, reserved: usize) -> Self {
        self.reserved = reserved;
        self
    }

    /// Number of oldest owned snapshots to delete when `owned` exist.
    pub fn purge_count(&self, owned: usize) -> usize {
        owned.saturating_sub(self.keep.saturating_add(self.reserved))
    }
}

/// Status polling cadence for freshly created snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: Some(DEFAULT_POLL_TIMEOUT),
        }
    }
}

/// Retry behaviour for deletes rejected with a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}
