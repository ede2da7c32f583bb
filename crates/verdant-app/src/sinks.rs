//! Renderer boundary.
//!
//! The terrain pushes its interleaved [`TerrainVertex`] buffer to a
//! [`GeometrySink`] whenever it changed, and the vegetation transforms go to an
//! [`InstanceSink`] once. Both are laid out to match
//! [`TERRAIN_VERTEX_LAYOUT`] and [`INSTANCE_LAYOUT`], so a GPU sink can write
//! the bytes straight into its buffers.

use verdant_mesh::{INSTANCE_LAYOUT, InstanceRaw, TERRAIN_VERTEX_LAYOUT, TerrainVertex};

/// Receives the terrain's vertex buffer.
pub trait GeometrySink {
    /// Called once per changed `revision` with one vertex per grid point.
    fn upload_geometry(&mut self, revision: u64, vertices: &[TerrainVertex]);
}

/// Receives per-instance transforms for a fixed-count instanced draw.
pub trait InstanceSink {
    fn upload_instances(&mut self, instances: &[InstanceRaw]);
}

/// Keeps the last vertex buffer it was given along with upload counters.
/// Used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingGeometrySink {
    pub uploads: u64,
    pub last_revision: Option<u64>,
    pub vertices: Vec<TerrainVertex>,
    /// Size in bytes of the last upload.
    pub buffer_size: u64,
}

impl RecordingGeometrySink {
    /// Vertices in the last upload, counted in [`TERRAIN_VERTEX_LAYOUT`] strides.
    pub fn vertex_count(&self) -> u64 {
        self.buffer_size / TERRAIN_VERTEX_LAYOUT.array_stride
    }

    /// The last upload as the bytes a vertex buffer would receive.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl GeometrySink for RecordingGeometrySink {
    fn upload_geometry(&mut self, revision: u64, vertices: &[TerrainVertex]) {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        self.uploads += 1;
        self.last_revision = Some(revision);
        self.buffer_size = bytes.len() as u64;
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
    }
}

/// Keeps the instance batch it was given.
#[derive(Debug, Default)]
pub struct RecordingInstanceSink {
    pub uploads: u32,
    pub instances: Vec<InstanceRaw>,
    pub buffer_size: u64,
}

impl RecordingInstanceSink {
    /// Instances in the last upload, counted in [`INSTANCE_LAYOUT`] strides.
    pub fn instance_count(&self) -> u64 {
        self.buffer_size / INSTANCE_LAYOUT.array_stride
    }
}

impl InstanceSink for RecordingInstanceSink {
    fn upload_instances(&mut self, instances: &[InstanceRaw]) {
        self.uploads += 1;
        self.buffer_size = bytemuck::cast_slice::<InstanceRaw, u8>(instances).len() as u64;
        self.instances = instances.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    fn vertex(i: usize) -> TerrainVertex {
        let f = i as f32;
        TerrainVertex {
            position: [f, -f, 0.5 * f],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 1.0],
        }
    }

    #[test]
    fn test_geometry_upload_sized_by_layout() {
        let mut sink = RecordingGeometrySink::default();
        let verts: Vec<_> = (0..9).map(vertex).collect();
        sink.upload_geometry(4, &verts);

        assert_eq!(sink.uploads, 1);
        assert_eq!(sink.last_revision, Some(4));
        assert_eq!(sink.buffer_size, 9 * 32);
        assert_eq!(sink.vertex_count(), 9);
        assert_eq!(sink.bytes().len() as u64, sink.buffer_size);
        assert_eq!(&sink.bytes()[..12], bytemuck::cast_slice::<f32, u8>(&verts[0].position));
    }

    #[test]
    fn test_geometry_upload_replaces_previous() {
        let mut sink = RecordingGeometrySink::default();
        sink.upload_geometry(2, &(0..9).map(vertex).collect::<Vec<_>>());
        sink.upload_geometry(3, &(0..4).map(vertex).collect::<Vec<_>>());
        assert_eq!(sink.uploads, 2);
        assert_eq!(sink.last_revision, Some(3));
        assert_eq!(sink.vertex_count(), 4);
        assert_eq!(sink.vertices.len(), 4);
    }

    #[test]
    fn test_instance_upload_sized_by_layout() {
        let mut sink = RecordingInstanceSink::default();
        let instances = vec![InstanceRaw::from_mat4(Mat4::IDENTITY); 3];
        sink.upload_instances(&instances);
        assert_eq!(sink.uploads, 1);
        assert_eq!(sink.buffer_size, 3 * 64);
        assert_eq!(sink.instance_count(), 3);
        assert_eq!(sink.instances, instances);
    }
}
