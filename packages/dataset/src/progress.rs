//! Progress reporting for dataset loading.
//!
//! The loader reports one unit of work per dataset file through
//! [`ProgressCallback`], so the rendering backend (an `indicatif` bar in
//! the CLI, nothing at all in tests) stays out of this crate.

use std::sync::Arc;

/// Receives progress updates while datasets are fetched.
///
/// Implementations must be `Send + Sync` since updates arrive from the
/// concurrently polled fetch futures.
pub trait ProgressCallback: Send + Sync {
    /// Set the number of datasets that will be fetched.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` datasets.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
