use std::sync::atomic::{AtomicU64, Ordering};

use tracing::error;

use crate::playback::PlaybackStartError;

static PLAYBACK_FAILURES: AtomicU64 = AtomicU64::new(0);

/// Record a failed playback-start request. Failures stay here: the widget
/// keeps its optimistic state and the user sees nothing.
pub fn report_playback_failure(err: &PlaybackStartError) {
    PLAYBACK_FAILURES.fetch_add(1, Ordering::Relaxed);
    error!("audio play request failed: {err}");
}

/// Number of start failures recorded since launch.
pub fn playback_failure_count() -> u64 {
    PLAYBACK_FAILURES.load(Ordering::Relaxed)
}
