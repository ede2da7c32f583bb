//! Animated heightfield terrain: seeded coherent noise, a per-tick grid
//! update, and immutable height-sample snapshots for downstream consumers.

mod error;
mod height_sample;
mod heightfield;
mod noise_field;
mod time_cursor;

pub use error::TerrainError;
pub use height_sample::{HeightSample, HeightSamplePublisher};
pub use heightfield::{HeightfieldMesh, HeightfieldParams, TerrainState};
pub use noise_field::NoiseField;
pub use time_cursor::TimeCursor;
