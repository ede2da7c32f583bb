//! Vegetation scatter: one-shot placement of instanced geometry on a
//! published terrain height snapshot.

mod params;
mod placement;
mod sampler;

pub use params::{ScatterError, ScatterParams};
pub use placement::{PlacementTransform, scatter};
pub use sampler::{PlacementEvent, PlacementSampler, PlacementState};
