//! Immutable height snapshots and their publication channel.

use std::sync::Arc;

use crate::NoiseField;

/// Terrain height at one instant of the time cursor.
///
/// Evaluates `(u, v) -> elevation` with the same constants the mesh used for
/// the tick it was published on. Cloning is cheap and the snapshot is
/// `Send + Sync`; its output never changes after publication, so a consumer
/// holding an old snapshot sees the terrain as it was on that tick.
#[derive(Clone, Debug)]
pub struct HeightSample {
    noise: Arc<NoiseField>,
    tick: u64,
    time: f64,
    frequency: f64,
    amplitude: f64,
}

impl HeightSample {
    pub(crate) fn new(
        noise: Arc<NoiseField>,
        tick: u64,
        time: f64,
        frequency: f64,
        amplitude: f64,
    ) -> Self {
        Self {
            noise,
            tick,
            time,
            frequency,
            amplitude,
        }
    }

    /// Elevation at normalized coordinates `u = x / width`, `v = y / height`.
    #[inline]
    pub fn elevation(&self, u: f64, v: f64) -> f64 {
        self.noise
            .perlin2(u * self.frequency, v * self.frequency + self.time)
            * self.amplitude
    }

    /// Tick on which this snapshot was taken.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Time cursor value captured by this snapshot.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Seed of the underlying noise field.
    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }
}

/// Holds the most recently published [`HeightSample`].
#[derive(Debug, Default)]
pub struct HeightSamplePublisher {
    latest: Option<HeightSample>,
    publications: u64,
}

impl HeightSamplePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot and return it.
    pub fn publish(&mut self, sample: HeightSample) -> &HeightSample {
        self.publications += 1;
        self.latest.insert(sample)
    }

    /// The latest snapshot, or `None` before the first publication.
    pub fn latest(&self) -> Option<&HeightSample> {
        self.latest.as_ref()
    }

    /// Number of snapshots published so far.
    pub fn publications(&self) -> u64 {
        self.publications
    }
}
