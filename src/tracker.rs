use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Gaps between keystrokes longer than this are treated as idle time and
/// excluded from the active typing duration.
pub const IDLE_THRESHOLD: Duration = Duration::from_secs(10);

/// Point-in-time view of the tracker, cheap to copy into the UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub letter_count: u64,
    pub speed_cpm: f64,
    pub active_duration: Duration,
    pub elapsed: Duration,
    pub tracking: bool,
}

/// Counts letters and active typing time across start/stop cycles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracker {
    letter_count: u64,
    session_start: Option<Instant>,
    last_keystroke: Option<Instant>,
    active_duration: Duration,
    tracking: bool,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_keystroke(&mut self, at: Instant) {
        if !self.tracking {
            return;
        }

        if let Some(last) = self.last_keystroke {
            let gap = at.saturating_duration_since(last);
            if gap <= IDLE_THRESHOLD {
                self.active_duration += gap;
            } else {
                debug!(gap_secs = gap.as_secs_f64(), "idle gap excluded");
            }
        }

        self.last_keystroke = Some(at);
        self.letter_count += 1;
        if self.session_start.is_none() {
            self.session_start = Some(at);
        }
    }

    /// Characters per minute over active typing time only.
    pub fn current_speed(&self) -> f64 {
        if self.active_duration.is_zero() {
            return 0.0;
        }
        (self.letter_count as f64 / self.active_duration.as_secs_f64()) * 60.0
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.tracking = true;
        if self.session_start.is_none() {
            self.session_start = Some(now);
        }
        // the pause before a resume is never measured
        self.last_keystroke = Some(now);
        info!(letter_count = self.letter_count, "tracking started");
    }

    pub fn stop(&mut self) {
        self.tracking = false;
        info!(
            letter_count = self.letter_count,
            active_secs = self.active_duration.as_secs_f64(),
            "tracking stopped"
        );
    }

    pub fn reset(&mut self) {
        *self = Self::default();
        info!("tracker reset");
    }

    pub fn letter_count(&self) -> u64 {
        self.letter_count
    }

    pub fn active_duration(&self) -> Duration {
        self.active_duration
    }

    pub fn session_start(&self) -> Option<Instant> {
        self.session_start
    }

    pub fn last_keystroke(&self) -> Option<Instant> {
        self.last_keystroke
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Time since the session started, zero before the first start.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.session_start
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    pub fn snapshot(&self, now: Instant) -> Metrics {
        Metrics {
            letter_count: self.letter_count,
            speed_cpm: self.current_speed(),
            active_duration: self.active_duration,
            elapsed: self.elapsed(now),
            tracking: self.tracking,
        }
    }
}
