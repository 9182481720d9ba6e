//! Frame pacing against a host-supplied monotonic timestamp.
//!
//! The host ticks the player once per display refresh; the clock decides on
//! which ticks a new decoded frame is actually consumed so the long-run frame
//! rate tracks the source fps rather than the refresh rate.

use std::time::Duration;

/// Deadline tracker for consuming decoded frames.
///
/// Timestamps are durations from an arbitrary monotonic origin chosen by the
/// host. A `next_due` of zero means "due immediately" (set on open and on
/// loop restart).
#[derive(Debug, Clone)]
pub struct FrameClock {
    next_due: Duration,
    frame_period: Duration,
}

impl FrameClock {
    /// Create a clock for the given source frame rate, due immediately.
    ///
    /// `fps` must be positive; the player guards before constructing.
    pub fn new(fps: f64) -> Self {
        Self {
            next_due: Duration::ZERO,
            frame_period: Duration::from_secs_f64(1.0 / fps),
        }
    }

    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }

    /// Whether a new frame should be consumed at `now`.
    pub fn due(&self, now: Duration) -> bool {
        now >= self.next_due
    }

    /// Advance the deadline after consuming a frame at `now`.
    ///
    /// The new deadline is one period after the previous one, preserving
    /// phase so lateness on a single tick does not accumulate. If that
    /// deadline is still not in the future the clock fell behind by more
    /// than a period (loop restart, long stall); it re-anchors to
    /// `now + period` instead of pulling a frame on every following tick
    /// until it catches up.
    pub fn advance(&mut self, now: Duration) {
        let next = self.next_due + self.frame_period;
        self.next_due = if next > now {
            next
        } else {
            now + self.frame_period
        };
    }

    /// Reset to due-immediately, used on open and on loop restart.
    pub fn make_due_now(&mut self) {
        self.next_due = Duration::ZERO;
    }
}
