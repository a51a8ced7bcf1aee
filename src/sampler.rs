use std::time::{Duration, Instant};

use tracing::trace;

use crate::history::{History, Sample};
use crate::tracker::Tracker;

pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(1000);
pub const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

/// Clamp a user supplied period to something the UI loop can keep up with.
pub fn sample_interval_from_ms(ms: u64) -> Duration {
    Duration::from_millis(ms).max(MIN_SAMPLE_INTERVAL)
}

/// Append one sample if the tracker is running and has accrued active time.
/// Returns whether a sample was taken.
pub fn sample(tracker: &Tracker, history: &mut History, now: Instant) -> bool {
    if !tracker.is_tracking() || tracker.active_duration().is_zero() {
        return false;
    }

    let sample = Sample::new(
        tracker.elapsed(now).as_secs_f64(),
        tracker.letter_count(),
        tracker.current_speed(),
    );
    trace!(?sample, "sampled");
    history.push(sample);
    true
}
