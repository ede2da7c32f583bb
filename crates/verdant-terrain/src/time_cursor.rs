//! Tick-driven animation time.

/// Monotonic time cursor advanced by a constant step once per tick.
///
/// The value is derived from the tick count rather than accumulated, so after
/// `n` ticks it is exactly `n * step` with no summation drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeCursor {
    ticks: u64,
    step: f64,
}

impl TimeCursor {
    /// Cursor at time 0. `step` is validated by the owning mesh.
    pub fn new(step: f64) -> Self {
        Self { ticks: 0, step }
    }

    /// Move forward one step.
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    /// Number of steps taken.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Current time value.
    pub fn value(&self) -> f64 {
        self.ticks as f64 * self.step
    }
}
