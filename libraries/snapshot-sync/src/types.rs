use serde::Serialize;
use snapshot_webhook::{DeliveryOptions, WebhookError};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Root of the date-partitioned archive
    pub archive_root: PathBuf,
    /// Pause after each successful delivery
    pub send_delay: Duration,
    /// Pause after the endpoint answers 429
    pub rate_limit_cooldown: Duration,
    /// Embed presentation
    pub delivery: DeliveryOptions,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            archive_root: PathBuf::from("archives"),
            send_delay: Duration::from_secs(2),
            rate_limit_cooldown: Duration::from_secs(60),
            delivery: DeliveryOptions::default(),
        }
    }
}

/// Longest `Retry-After` the endpoint can impose on a run
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(15 * 60);

impl SyncOptions {
    /// Cooldown to apply after a rate-limited delivery.
    ///
    /// Honors a longer `Retry-After` from the endpoint, up to
    /// [`MAX_RETRY_AFTER`], and is always strictly longer than `send_delay`.
    pub fn cooldown_for(&self, err: &WebhookError) -> Duration {
        let floor = self.send_delay + Duration::from_secs(1);
        let retry_after = err.retry_after().unwrap_or_default().min(MAX_RETRY_AFTER);
        self.rate_limit_cooldown.max(retry_after).max(floor)
    }
}

/// Result of delivering one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Delivered,
    Failed { reason: String, rate_limited: bool },
}

/// Outcome for one archive key, in delivery order
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub key: String,
    pub outcome: DeliveryOutcome,
}

/// Summary of a completed sync run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncSummary {
    pub total_discovered: usize,
    pub already_delivered: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub rate_limited: usize,
    pub duration_seconds: u64,
    pub files: Vec<FileReport>,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} discovered, {} already delivered, {} attempted, {} succeeded, {} failed",
            self.total_discovered, self.already_delivered, self.attempted, self.succeeded, self.failed
        )?;
        if self.rate_limited > 0 {
            write!(f, " ({} rate limited)", self.rate_limited)?;
        }
        Ok(())
    }
}
