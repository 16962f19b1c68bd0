//! Snapshot Sync
//!
//! Delivers every archived capture that has not been delivered yet, oldest
//! first, one at a time, pausing between messages and backing off when the
//! endpoint rate-limits.

mod manager;
mod pause;
mod types;

// Public exports
pub use manager::{discover, filter_pending, pending, SyncManager};
pub use pause::{Pause, TokioPause};
pub use types::{DeliveryOutcome, FileReport, SyncOptions, SyncSummary, MAX_RETRY_AFTER};
