//! Offline form-submission sync — unimplemented extension point.
//!
//! The platform registers a background-sync handler for form submissions
//! made while offline, but no persistence or replay exists yet: a queued
//! submission is acknowledged and dropped. This type keeps the seam
//! explicit so a real queue (storage + replay on reconnect) can slot in
//! without changing the worker's surface.

use crate::fetch::FetchRequest;

/// Placeholder queue for offline form submissions.
#[derive(Debug, Default)]
pub struct SyncQueue;

impl SyncQueue {
    pub fn new() -> Self {
        Self
    }

    /// Accept a submission for later replay.
    ///
    /// TODO: persist the request and replay it on reconnect; today it is
    /// logged and discarded.
    pub fn enqueue(&self, request: &FetchRequest) {
        tracing::warn!(
            uri = %request.uri,
            "Offline sync not implemented; submission dropped"
        );
    }
}
