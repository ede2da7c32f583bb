//! Variable-rate frame loop.
//!
//! Runs exactly one terrain tick per displayed frame. Frame time is measured
//! for pacing and statistics only; the terrain's time cursor advances by a
//! constant step per tick regardless of how long the frame took.

use std::time::{Duration, Instant};

use tracing::warn;

/// Frames longer than this are reported and clamped in the statistics.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Frame counter and timing statistics.
pub struct FrameLoop {
    previous_time: Instant,
    frame_count: u64,
    total_time: f64,
    slowest_frame: f64,
}

impl FrameLoop {
    /// Creates a new `FrameLoop` starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frame_count: 0,
            total_time: 0.0,
            slowest_frame: 0.0,
        }
    }

    /// Measure the wall-clock frame time and run one frame.
    ///
    /// `frame_fn` receives the zero-based frame index.
    pub fn tick(&mut self, frame_fn: impl FnOnce(u64)) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.run_frame(frame_time, frame_fn);
    }

    /// Run one frame with an explicit frame time (in seconds).
    pub fn run_frame(&mut self, frame_time: f64, frame_fn: impl FnOnce(u64)) {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };

        frame_fn(self.frame_count);

        self.frame_count += 1;
        self.total_time += frame_time;
        self.slowest_frame = self.slowest_frame.max(frame_time);
    }

    /// Time left in the current frame budget for `target_fps`, measured from
    /// the start of the last frame. `None` when unpaced or already over budget.
    pub fn remaining_budget(&self, target_fps: u32) -> Option<Duration> {
        if target_fps == 0 {
            return None;
        }
        let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps));
        budget.checked_sub(self.previous_time.elapsed())
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of (clamped) frame times in seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Longest (clamped) frame time seen.
    pub fn slowest_frame(&self) -> f64 {
        self.slowest_frame
    }

    /// Mean frames per second over the run, 0 before any time has elapsed.
    pub fn average_fps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.frame_count as f64 / self.total_time
        } else {
            0.0
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
