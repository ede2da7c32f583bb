//! The animated heightfield mesh.
//!
//! Each tick advances the time cursor, re-evaluates every vertex elevation from
//! the noise field, recomputes normals, bumps the upload revision, and publishes
//! a [`HeightSample`] for that instant. The whole grid is recomputed every tick.

use std::sync::Arc;

use tracing::{debug, trace};
use verdant_mesh::{MeshState, PlaneGrid, TerrainVertex};

use crate::{HeightSample, HeightSamplePublisher, NoiseField, TerrainError, TimeCursor};

/// Grid and noise constants for a [`HeightfieldMesh`].
#[derive(Clone, Debug, PartialEq)]
pub struct HeightfieldParams {
    /// World-space extent along X.
    pub width: f32,
    /// World-space extent along Y.
    pub height: f32,
    /// Subdivisions per axis.
    pub segments: u32,
    /// Multiplier on normalized coordinates before sampling noise. Default: 10.
    pub frequency: f64,
    /// Multiplier on raw noise. Default: 5.
    pub amplitude: f64,
    /// Time cursor increment per tick. Default: 0.01.
    pub time_step: f64,
}

impl Default for HeightfieldParams {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            segments: 300,
            frequency: 10.0,
            amplitude: 5.0,
            time_step: 0.01,
        }
    }
}

impl HeightfieldParams {
    fn validate(&self) -> Result<(), TerrainError> {
        for (name, value) in [
            ("frequency", self.frequency),
            ("amplitude", self.amplitude),
            ("time_step", self.time_step),
        ] {
            if !value.is_finite() {
                return Err(TerrainError::NonFinite { name, value });
            }
        }
        if self.time_step <= 0.0 {
            return Err(TerrainError::NonPositiveTimeStep(self.time_step));
        }
        Ok(())
    }
}

/// Lifecycle of a [`HeightfieldMesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainState {
    /// Constructed; no update has completed and nothing is published.
    Uninitialized,
    /// At least one update completed; a sample is always available.
    Running,
}

/// Owns the terrain grid and animates it from a [`NoiseField`].
#[derive(Debug)]
pub struct HeightfieldMesh {
    params: HeightfieldParams,
    noise: Arc<NoiseField>,
    grid: PlaneGrid,
    time: TimeCursor,
    mesh_state: MeshState,
    publisher: HeightSamplePublisher,
    state: TerrainState,
}

impl HeightfieldMesh {
    /// Build a flat mesh. Fails on a degenerate grid or non-finite constants.
    ///
    /// The noise field moves behind an `Arc` shared with every published sample.
    pub fn new(params: HeightfieldParams, noise: NoiseField) -> Result<Self, TerrainError> {
        params.validate()?;
        let grid = PlaneGrid::new(params.width, params.height, params.segments)?;
        debug!(
            seed = noise.seed(),
            segments = params.segments,
            vertices = grid.vertex_count(),
            "heightfield created"
        );
        Ok(Self {
            time: TimeCursor::new(params.time_step),
            params,
            noise: Arc::new(noise),
            grid,
            mesh_state: MeshState::new(),
            publisher: HeightSamplePublisher::new(),
            state: TerrainState::Uninitialized,
        })
    }

    /// Move the time cursor forward by one fixed step.
    ///
    /// The step is not scaled by frame time, so animation speed follows the
    /// tick rate.
    pub fn advance(&mut self) {
        self.time.advance();
    }

    /// Recompute every vertex elevation and normal at the current time, then
    /// publish the matching snapshot.
    pub fn update(&mut self) -> &HeightSample {
        let sample = self.snapshot();
        let width = f64::from(self.params.width);
        let height = f64::from(self.params.height);

        self.grid.set_elevations(|x, y| {
            sample.elevation(f64::from(x) / width, f64::from(y) / height) as f32
        });
        self.grid.recompute_normals();
        let revision = self.mesh_state.mark_changed();

        trace!(tick = sample.tick(), time = sample.time(), revision, "terrain updated");

        if self.state == TerrainState::Uninitialized {
            self.state = TerrainState::Running;
            debug!(tick = sample.tick(), "first height sample published");
        }

        self.publisher.publish(sample)
    }

    /// One frame: [`advance`](Self::advance) then [`update`](Self::update).
    pub fn tick(&mut self) -> &HeightSample {
        self.advance();
        self.update()
    }

    /// A snapshot at the current cursor without touching the grid.
    fn snapshot(&self) -> HeightSample {
        HeightSample::new(
            Arc::clone(&self.noise),
            self.time.ticks(),
            self.time.value(),
            self.params.frequency,
            self.params.amplitude,
        )
    }

    pub fn state(&self) -> TerrainState {
        self.state
    }

    pub fn params(&self) -> &HeightfieldParams {
        &self.params
    }

    pub fn time(&self) -> &TimeCursor {
        &self.time
    }

    /// The latest published snapshot, or `None` while [`TerrainState::Uninitialized`].
    pub fn latest_sample(&self) -> Option<&HeightSample> {
        self.publisher.latest()
    }

    /// Number of snapshots published so far.
    pub fn publications(&self) -> u64 {
        self.publisher.publications()
    }

    pub fn vertex_count(&self) -> usize {
        self.grid.vertex_count()
    }

    /// Position buffer, `(x, y, elevation)` per vertex.
    pub fn positions(&self) -> &[[f32; 3]] {
        self.grid.positions()
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        self.grid.normals()
    }

    pub fn indices(&self) -> &[u32] {
        self.grid.indices()
    }

    /// Interleaved vertex buffer for upload.
    pub fn vertices(&self) -> Vec<TerrainVertex> {
        self.grid
            .positions()
            .iter()
            .zip(self.grid.normals())
            .zip(self.grid.uvs())
            .map(|((&position, &normal), &uv)| TerrainVertex {
                position,
                normal,
                uv,
            })
            .collect()
    }

    /// Current geometry revision.
    pub fn revision(&self) -> u64 {
        self.mesh_state.revision()
    }

    /// `true` while the renderer has not acknowledged the current revision.
    pub fn needs_upload(&self) -> bool {
        self.mesh_state.needs_upload()
    }

    /// Acknowledge that the renderer uploaded `revision`.
    pub fn mark_uploaded(&mut self, revision: u64) {
        self.mesh_state.mark_uploaded(revision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_mesh::GridError;

    fn small_params() -> HeightfieldParams {
        HeightfieldParams {
            segments: 16,
            ..Default::default()
        }
    }

    fn mesh(seed: u32) -> HeightfieldMesh {
        HeightfieldMesh::new(small_params(), NoiseField::new(seed)).unwrap()
    }

    #[test]
    fn test_starts_uninitialized_and_flat() {
        let m = mesh(1);
        assert_eq!(m.state(), TerrainState::Uninitialized);
        assert!(m.latest_sample().is_none());
        assert_eq!(m.time().value(), 0.0);
        assert!(m.positions().iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn test_first_update_transitions_to_running() {
        let mut m = mesh(1);
        m.update();
        assert_eq!(m.state(), TerrainState::Running);
        assert_eq!(m.publications(), 1);
        m.tick();
        assert_eq!(m.state(), TerrainState::Running);
        assert_eq!(m.publications(), 2);
    }

    #[test]
    fn test_tick_publishes_current_time() {
        let mut m = mesh(3);
        for expected_tick in 1..=5 {
            let sample = m.tick();
            assert_eq!(sample.tick(), expected_tick);
            assert_eq!(sample.time(), expected_tick as f64 * 0.01);
        }
    }

    #[test]
    fn test_samples_share_the_constructor_noise() {
        let mut m = mesh(77);
        let first = m.tick().clone();
        let second = m.tick();
        assert_eq!(first.seed(), 77);
        assert_eq!(second.seed(), 77);

        let reference = NoiseField::new(77);
        let (u, v) = (0.37, 0.61);
        let expected = reference.perlin2(u * 10.0, v * 10.0 + second.time()) * 5.0;
        assert_eq!(second.elevation(u, v), expected);
    }

    #[test]
    fn test_topology_invariant_across_updates() {
        let mut m = mesh(8);
        let xy: Vec<_> = m.positions().iter().map(|p| (p[0], p[1])).collect();
        let count = m.vertex_count();
        assert_eq!(count, 17 * 17);

        for _ in 0..20 {
            m.tick();
            assert_eq!(m.vertex_count(), count);
            for (p, &(x, y)) in m.positions().iter().zip(&xy) {
                assert_eq!((p[0], p[1]), (x, y), "only elevation may change");
            }
        }
    }

    #[test]
    fn test_vertex_elevation_matches_published_sample() {
        let mut m = mesh(21);
        for _ in 0..7 {
            m.tick();
        }
        let sample = m.latest_sample().unwrap().clone();
        let (w, h) = (f64::from(m.params().width), f64::from(m.params().height));
        for p in m.positions() {
            let expected = sample.elevation(f64::from(p[0]) / w, f64::from(p[1]) / h) as f32;
            assert_eq!(p[2], expected);
        }
    }

    #[test]
    fn test_same_seed_meshes_agree() {
        let mut a = mesh(77);
        let mut b = mesh(77);
        for _ in 0..10 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.normals(), b.normals());
    }

    #[test]
    fn test_terrain_animates_over_time() {
        let mut m = mesh(5);
        m.tick();
        let before = m.positions().to_vec();
        for _ in 0..30 {
            m.tick();
        }
        assert_ne!(before, m.positions(), "terrain should deform as time advances");
    }

    #[test]
    fn test_old_snapshot_unaffected_by_later_ticks() {
        let mut m = mesh(12);
        let old = m.tick().clone();
        let before = old.elevation(0.3, -0.2);
        for _ in 0..50 {
            m.tick();
        }
        assert_eq!(old.elevation(0.3, -0.2), before);
        assert_eq!(old.tick(), 1);
    }

    #[test]
    fn test_every_update_requests_upload() {
        let mut m = mesh(2);
        assert!(m.needs_upload());
        for _ in 0..3 {
            let rev = m.revision();
            m.mark_uploaded(rev);
            assert!(!m.needs_upload());
            m.tick();
            assert!(m.needs_upload(), "every tick must flag the geometry as changed");
            assert_eq!(m.revision(), rev + 1);
        }
    }

    #[test]
    fn test_normals_unit_after_update() {
        let mut m = mesh(4);
        m.tick();
        for n in m.normals() {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_minimal_grid() {
        let params = HeightfieldParams {
            segments: 1,
            ..Default::default()
        };
        let mut m = HeightfieldMesh::new(params, NoiseField::new(0)).unwrap();
        m.tick();
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.indices().len(), 6);
        for n in m.normals() {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!(n.iter().all(|c| c.is_finite()));
            assert!((len - 1.0).abs() < 1e-4, "degenerate normal {n:?}");
        }
    }

    #[test]
    fn test_interleaved_vertices() {
        let mut m = mesh(6);
        m.tick();
        let verts = m.vertices();
        assert_eq!(verts.len(), m.vertex_count());
        assert_eq!(verts[10].position, m.positions()[10]);
        assert_eq!(verts[10].normal, m.normals()[10]);
    }

    #[test]
    fn test_rejects_invalid_grid() {
        let zero_segments = HeightfieldParams {
            segments: 0,
            ..Default::default()
        };
        assert_eq!(
            HeightfieldMesh::new(zero_segments, NoiseField::new(0)).unwrap_err(),
            TerrainError::Grid(GridError::ZeroSegments)
        );

        let negative_width = HeightfieldParams {
            width: -50.0,
            ..Default::default()
        };
        assert!(matches!(
            HeightfieldMesh::new(negative_width, NoiseField::new(0)),
            Err(TerrainError::Grid(GridError::InvalidExtent { .. }))
        ));
    }

    #[test]
    fn test_rejects_bad_noise_constants() {
        let nan_amp = HeightfieldParams {
            amplitude: f64::NAN,
            ..small_params()
        };
        assert!(matches!(
            HeightfieldMesh::new(nan_amp, NoiseField::new(0)),
            Err(TerrainError::NonFinite { name: "amplitude", .. })
        ));

        let frozen = HeightfieldParams {
            time_step: 0.0,
            ..small_params()
        };
        assert_eq!(
            HeightfieldMesh::new(frozen, NoiseField::new(0)).unwrap_err(),
            TerrainError::NonPositiveTimeStep(0.0)
        );
    }
}
