//! Mesh data for the terrain patch: plane grid topology, smooth normals,
//! upload revision tracking, and the GPU vertex/instance formats.

pub mod grid;
pub mod normals;
pub mod state;
pub mod vertex_format;

pub use grid::{GridError, PlaneGrid};
pub use normals::{compute_vertex_normals, face_normal};
pub use state::MeshState;
pub use vertex_format::{
    INSTANCE_ATTRIBUTES, INSTANCE_LAYOUT, InstanceRaw, TERRAIN_VERTEX_ATTRIBUTES,
    TERRAIN_VERTEX_LAYOUT, TerrainVertex,
};
