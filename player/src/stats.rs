//! Playback statistics.
//!
//! Plain counters owned by the player (single-threaded model, no atomics)
//! with a periodic log summary.

use std::time::{Duration, Instant};

/// Tracks decode/draw activity for one open stream.
pub struct PlaybackStats {
    /// Frames pulled from the decoder.
    frames_decoded: u64,

    /// Draw calls issued (once per render tick).
    frames_rendered: u64,

    /// Completed loop restarts.
    loops_completed: u64,

    /// Source frame rate, for the summary line.
    fps: f64,

    /// Last time stats were logged.
    last_stats_log: Instant,
}

impl PlaybackStats {
    pub fn new(fps: f64) -> Self {
        Self {
            frames_decoded: 0,
            frames_rendered: 0,
            loops_completed: 0,
            fps,
            last_stats_log: Instant::now(),
        }
    }

    pub fn record_decoded(&mut self) {
        self.frames_decoded += 1;
    }

    pub fn record_rendered(&mut self) {
        self.frames_rendered += 1;
    }

    pub fn record_loop(&mut self) {
        self.loops_completed += 1;
    }

    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn loops_completed(&self) -> u64 {
        self.loops_completed
    }

    /// Log a summary if `interval` has elapsed since the last one.
    pub fn maybe_log_stats(&mut self, interval: Duration) {
        if self.last_stats_log.elapsed() < interval {
            return;
        }

        log::info!(
            "Playback stats ({:.2} fps): {} decoded, {} drawn, {} loops",
            self.fps,
            self.frames_decoded,
            self.frames_rendered,
            self.loops_completed
        );

        self.last_stats_log = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut stats = PlaybackStats::new(25.0);
        stats.record_decoded();
        stats.record_decoded();
        stats.record_rendered();
        stats.record_loop();

        assert_eq!(stats.frames_decoded(), 2);
        assert_eq!(stats.frames_rendered(), 1);
        assert_eq!(stats.loops_completed(), 1);
    }
}
