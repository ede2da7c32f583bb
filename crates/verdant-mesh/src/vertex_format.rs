//! `wgpu` buffer layouts for the terrain vertex stream and the vegetation
//! instance stream.
//!
//! ## Terrain vertex (32 bytes, per-vertex)
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x2 | uv       |
//!
//! ## Instance (64 bytes, per-instance)
//!
//! Locations 5..=8 carry the four columns of the model matrix.

use std::mem;

use glam::Mat4;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Interleaved terrain vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 32]);

/// Per-instance model matrix, column-major.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(InstanceRaw, [u8; 64]);

impl InstanceRaw {
    /// Pack a model matrix for upload.
    pub fn from_mat4(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }

    /// Unpack back to a `Mat4`.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

impl From<Mat4> for InstanceRaw {
    fn from(model: Mat4) -> Self {
        Self::from_mat4(model)
    }
}

pub const TERRAIN_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

/// Vertex buffer layout for the terrain pipeline.
pub const TERRAIN_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TerrainVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TERRAIN_VERTEX_ATTRIBUTES,
};

pub const INSTANCE_ATTRIBUTES: [VertexAttribute; 4] = [
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: 0,
        shader_location: 5,
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: 16,
        shader_location: 6,
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: 32,
        shader_location: 7,
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: 48,
        shader_location: 8,
    },
];

/// Instance buffer layout for the vegetation pipeline.
pub const INSTANCE_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<InstanceRaw>() as u64,
    step_mode: VertexStepMode::Instance,
    attributes: &INSTANCE_ATTRIBUTES,
};

const _: () = assert!(TERRAIN_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(TerrainVertex, normal) as u64);
const _: () = assert!(TERRAIN_VERTEX_ATTRIBUTES[2].offset == mem::offset_of!(TerrainVertex, uv) as u64);
const _: () = assert!(
    INSTANCE_ATTRIBUTES[3].offset + 16 == mem::size_of::<InstanceRaw>() as u64,
    "Last instance column must end at the stride"
);
