//! One-shot placement state machine.
//!
//! The sampler waits until a [`HeightSample`] is offered, places every instance
//! against that single snapshot, and then stays placed forever. Later snapshots
//! are ignored even though the terrain keeps animating, so placed instances
//! drift vertically away from the ground over time.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use verdant_terrain::HeightSample;

use crate::{PlacementTransform, ScatterParams, scatter};

/// Where the sampler is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementState {
    /// No sample has been offered yet.
    AwaitingSample,
    /// Instances were placed; terminal.
    Placed,
}

/// Result of offering a sample to the sampler.
#[derive(Debug, PartialEq)]
pub enum PlacementEvent<'a> {
    /// Nothing to place against yet. Not an error.
    NotReady,
    /// This call performed the placement.
    Placed(&'a [PlacementTransform]),
    /// Placement already happened on an earlier call.
    AlreadyPlaced,
}

impl<'a> PlacementEvent<'a> {
    /// Transforms produced by this call; empty unless it is [`PlacementEvent::Placed`].
    pub fn transforms(&self) -> &'a [PlacementTransform] {
        match *self {
            Self::Placed(transforms) => transforms,
            Self::NotReady | Self::AlreadyPlaced => &[],
        }
    }
}

/// Places instances exactly once, on the first sample it receives.
#[derive(Debug)]
pub struct PlacementSampler {
    params: ScatterParams,
    rng: ChaCha8Rng,
    transforms: Vec<PlacementTransform>,
    source_tick: Option<u64>,
}

impl PlacementSampler {
    /// A sampler whose positions and yaws come from `seed`.
    pub fn new(params: ScatterParams, seed: u64) -> Self {
        Self {
            params,
            rng: ChaCha8Rng::seed_from_u64(seed),
            transforms: Vec::new(),
            source_tick: None,
        }
    }

    pub fn state(&self) -> PlacementState {
        if self.source_tick.is_some() {
            PlacementState::Placed
        } else {
            PlacementState::AwaitingSample
        }
    }

    pub fn params(&self) -> &ScatterParams {
        &self.params
    }

    /// Offer the latest published sample, if any.
    ///
    /// The first call with `Some` places `count` instances and transitions to
    /// [`PlacementState::Placed`]. Every other call is a no-op.
    pub fn offer(&mut self, sample: Option<&HeightSample>) -> PlacementEvent<'_> {
        if self.source_tick.is_some() {
            return PlacementEvent::AlreadyPlaced;
        }
        let Some(sample) = sample else {
            return PlacementEvent::NotReady;
        };

        self.transforms = scatter(sample, &self.params, &mut self.rng);
        self.source_tick = Some(sample.tick());
        debug!(
            count = self.transforms.len(),
            tick = sample.tick(),
            time = sample.time(),
            "vegetation placed"
        );
        PlacementEvent::Placed(&self.transforms)
    }

    /// Placed transforms; empty while awaiting a sample.
    pub fn transforms(&self) -> &[PlacementTransform] {
        &self.transforms
    }

    /// Tick of the snapshot the placement was computed against.
    pub fn source_tick(&self) -> Option<u64> {
        self.source_tick
    }

    /// Largest vertical gap between a placed instance's base and the ground in
    /// `current`. Zero before placement or when `current` is the source snapshot.
    pub fn max_drift(&self, current: &HeightSample) -> f32 {
        let width = f64::from(self.params.width());
        let height = f64::from(self.params.height());
        self.transforms
            .iter()
            .map(|t| {
                let ground = current.elevation(
                    f64::from(t.position.x) / width,
                    f64::from(t.position.z) / height,
                ) as f32;
                (t.position.y - self.params.offset() - ground).abs()
            })
            .fold(0.0, f32::max)
    }
}
