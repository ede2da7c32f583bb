//! Per-frame orchestration of terrain and vegetation.
//!
//! A frame runs, in order: the terrain tick (elevations, normals, sample
//! publication), the geometry upload if the renderer is behind, and finally
//! the offer of the freshly published sample to the placement sampler. The
//! sampler only acts on the first sample it sees.

use glam::Vec3;
use serde::Serialize;
use tracing::{debug, info};
use verdant_config::{Config, ScatterConfig, TerrainConfig};
use verdant_mesh::InstanceRaw;
use verdant_scatter::{PlacementEvent, PlacementSampler, PlacementState, ScatterError, ScatterParams};
use verdant_terrain::{HeightfieldMesh, HeightfieldParams, NoiseField, TerrainError};

use crate::sinks::{GeometrySink, InstanceSink};

/// Errors from building a scene out of a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid terrain config: {0}")]
    Terrain(#[from] TerrainError),
    #[error("invalid scatter config: {0}")]
    Scatter(#[from] ScatterError),
}

/// Seeds actually used for a run, after filling in unset ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneSeeds {
    pub terrain: u32,
    pub scatter: u64,
}

impl SceneSeeds {
    /// Use the configured seeds, drawing any missing one from the thread RNG.
    pub fn resolve(config: &Config) -> Self {
        Self {
            terrain: config.terrain.seed.unwrap_or_else(rand::random),
            scatter: config.scatter.seed.unwrap_or_else(rand::random),
        }
    }
}

/// Map terrain config onto mesh parameters.
pub fn heightfield_params(terrain: &TerrainConfig) -> HeightfieldParams {
    HeightfieldParams {
        width: terrain.width,
        height: terrain.height,
        segments: terrain.segments,
        frequency: terrain.frequency,
        amplitude: terrain.amplitude,
        time_step: terrain.time_step,
    }
}

/// Map scatter config onto validated parameters over the terrain's extent.
pub fn scatter_params(
    terrain: &TerrainConfig,
    scatter: &ScatterConfig,
) -> Result<ScatterParams, ScatterError> {
    ScatterParams::new(
        terrain.width,
        terrain.height,
        scatter.count,
        scatter.offset,
        Vec3::from_array(scatter.scale),
    )
}

/// What happened during one [`TerrainScene::frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Tick of the sample published this frame.
    pub tick: u64,
    /// Revision handed to the geometry sink, if any.
    pub uploaded_revision: Option<u64>,
    /// Instances delivered to the instance sink this frame.
    pub instances_placed: usize,
}

/// Terrain, placement sampler, and the two renderer sinks.
pub struct TerrainScene<G, I> {
    terrain: HeightfieldMesh,
    sampler: PlacementSampler,
    geometry_sink: G,
    instance_sink: I,
}

impl<G: GeometrySink, I: InstanceSink> TerrainScene<G, I> {
    pub fn new(
        terrain: HeightfieldMesh,
        sampler: PlacementSampler,
        geometry_sink: G,
        instance_sink: I,
    ) -> Self {
        Self {
            terrain,
            sampler,
            geometry_sink,
            instance_sink,
        }
    }

    /// Build the terrain and sampler described by `config` with explicit seeds.
    pub fn from_config(
        config: &Config,
        seeds: SceneSeeds,
        geometry_sink: G,
        instance_sink: I,
    ) -> Result<Self, SceneError> {
        let terrain = HeightfieldMesh::new(
            heightfield_params(&config.terrain),
            NoiseField::new(seeds.terrain),
        )?;
        let sampler = PlacementSampler::new(
            scatter_params(&config.terrain, &config.scatter)?,
            seeds.scatter,
        );
        info!(
            terrain_seed = seeds.terrain,
            scatter_seed = seeds.scatter,
            vertices = terrain.vertex_count(),
            instances = sampler.params().count(),
            "scene built"
        );
        Ok(Self::new(terrain, sampler, geometry_sink, instance_sink))
    }

    /// Run one frame.
    pub fn frame(&mut self) -> FrameReport {
        let tick = self.terrain.tick().tick();

        let uploaded_revision = if self.terrain.needs_upload() {
            let revision = self.terrain.revision();
            self.geometry_sink.upload_geometry(revision, &self.terrain.vertices());
            self.terrain.mark_uploaded(revision);
            Some(revision)
        } else {
            None
        };

        let instances_placed = match self.sampler.offer(self.terrain.latest_sample()) {
            PlacementEvent::Placed(transforms) => {
                let instances: Vec<InstanceRaw> = transforms
                    .iter()
                    .map(|t| InstanceRaw::from_mat4(t.model_matrix()))
                    .collect();
                self.instance_sink.upload_instances(&instances);
                debug!(tick, count = instances.len(), "instances uploaded");
                instances.len()
            }
            PlacementEvent::NotReady | PlacementEvent::AlreadyPlaced => 0,
        };

        FrameReport {
            tick,
            uploaded_revision,
            instances_placed,
        }
    }

    pub fn terrain(&self) -> &HeightfieldMesh {
        &self.terrain
    }

    pub fn sampler(&self) -> &PlacementSampler {
        &self.sampler
    }

    pub fn placement_state(&self) -> PlacementState {
        self.sampler.state()
    }

    /// Vertical drift of placed instances against the latest terrain.
    pub fn instance_drift(&self) -> f32 {
        self.terrain
            .latest_sample()
            .map_or(0.0, |sample| self.sampler.max_drift(sample))
    }

    pub fn geometry_sink(&self) -> &G {
        &self.geometry_sink
    }

    pub fn instance_sink(&self) -> &I {
        &self.instance_sink
    }
}
