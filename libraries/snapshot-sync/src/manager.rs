use crate::{
    pause::{Pause, TokioPause},
    DeliveryOutcome, FileReport, SyncOptions, SyncSummary,
};
use snapshot_archive::{ArchiveFile, ArchiveScanner, DeliveryTracker};
use snapshot_webhook::WebhookClient;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Delivers undelivered archive files to the webhook in date order.
///
/// Deliveries are strictly sequential. The tracker is persisted after every
/// success, so an interrupted run loses nothing and a rerun only retries
/// what is still missing.
pub struct SyncManager {
    client: WebhookClient,
    options: SyncOptions,
    pause: Arc<dyn Pause>,
}

impl SyncManager {
    pub fn new(client: WebhookClient, options: SyncOptions) -> Self {
        Self {
            client,
            options,
            pause: Arc::new(TokioPause),
        }
    }

    /// Replace how the manager waits between deliveries.
    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }

    /// Every archived capture under the configured root, oldest first.
    pub fn discover(&self) -> Vec<ArchiveFile> {
        discover(&self.options.archive_root)
    }

    /// The ordered work queue for the next run.
    pub fn pending(&self, tracker: &DeliveryTracker) -> Vec<ArchiveFile> {
        pending(&self.options.archive_root, tracker)
    }

    /// Run one backfill pass.
    ///
    /// Per-file failures are logged and counted; they never abort the run.
    pub async fn sync(&self, tracker: &mut DeliveryTracker) -> SyncSummary {
        let start_time = Instant::now();

        // Phase 1: Discover
        debug!(root = %self.options.archive_root.display(), "Scanning archive");
        let discovered = self.discover();

        // Phase 2: Filter
        let queue = filter_pending(&discovered, tracker);

        let mut summary = SyncSummary {
            total_discovered: discovered.len(),
            already_delivered: discovered.len() - queue.len(),
            ..SyncSummary::default()
        };

        info!(
            discovered = summary.total_discovered,
            already_delivered = summary.already_delivered,
            pending = queue.len(),
            "Starting sync"
        );

        // Phase 3: Deliver
        let last = queue.len().saturating_sub(1);
        for (index, file) in queue.iter().enumerate() {
            summary.attempted += 1;
            debug!(
                file = %file.key(),
                position = index + 1,
                total = queue.len(),
                "Delivering"
            );

            match self.client.deliver(file.path(), &self.options.delivery).await {
                Ok(()) => {
                    if let Err(e) = tracker.record_success(file.key()) {
                        error!(
                            file = %file.key(),
                            error = %e,
                            "Delivered but failed to persist delivery record"
                        );
                    }
                    summary.succeeded += 1;
                    summary.files.push(FileReport {
                        key: file.key().to_string(),
                        outcome: DeliveryOutcome::Delivered,
                    });

                    if index < last {
                        self.pause.pause(self.options.send_delay).await;
                    }
                }
                Err(e) => {
                    let rate_limited = e.is_rate_limited();
                    summary.failed += 1;
                    summary.files.push(FileReport {
                        key: file.key().to_string(),
                        outcome: DeliveryOutcome::Failed {
                            reason: e.to_string(),
                            rate_limited,
                        },
                    });

                    if rate_limited {
                        summary.rate_limited += 1;
                        let cooldown = self.options.cooldown_for(&e);
                        warn!(
                            file = %file.key(),
                            cooldown_secs = cooldown.as_secs_f64(),
                            "Rate limited, cooling down"
                        );
                        if index < last {
                            self.pause.pause(cooldown).await;
                        }
                    } else {
                        warn!(file = %file.key(), error = %e, "Delivery failed");
                    }
                }
            }
        }

        summary.duration_seconds = start_time.elapsed().as_secs();

        info!(
            "Sync complete: {} discovered, {} already delivered, {} attempted, {} succeeded, {} failed in {}s",
            summary.total_discovered,
            summary.already_delivered,
            summary.attempted,
            summary.succeeded,
            summary.failed,
            summary.duration_seconds
        );

        summary
    }
}

/// Every archived capture under `root`, oldest first. Undated names sort
/// first; ties break on the path key.
pub fn discover(root: &Path) -> Vec<ArchiveFile> {
    let mut files = ArchiveScanner::new().scan_archive(root);
    files.sort();
    files
}

/// Discovered files under `root` that `tracker` has not recorded, in
/// delivery order.
pub fn pending(root: &Path, tracker: &DeliveryTracker) -> Vec<ArchiveFile> {
    filter_pending(&discover(root), tracker)
}

/// The subset of an already discovered listing that `tracker` has not
/// recorded, keeping its order.
pub fn filter_pending(files: &[ArchiveFile], tracker: &DeliveryTracker) -> Vec<ArchiveFile> {
    files
        .iter()
        .filter(|file| !tracker.has(file.key()))
        .cloned()
        .collect()
}
