//! Fixed-topology plane grid.
//!
//! A `width x height` patch centered on the origin, subdivided `segments` times
//! per axis. Rows run from `+height/2` down to `-height/2`, columns from
//! `-width/2` to `+width/2`. The third position component is the elevation and
//! is the only value that changes after construction.

use crate::normals::compute_vertex_normals;

/// Largest subdivision count whose vertex indices still fit in `u32`.
pub const MAX_SEGMENTS: u32 = 65_534;

/// Reasons a grid cannot be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Width or height is zero, negative, or not finite.
    #[error("grid extent must be positive and finite, got {width} x {height}")]
    InvalidExtent { width: f32, height: f32 },

    /// A grid needs at least one subdivision per axis.
    #[error("grid needs at least one segment per axis")]
    ZeroSegments,

    /// Vertex indices would overflow the `u32` index buffer.
    #[error("{segments} segments exceeds the maximum of {max}")]
    TooManySegments { segments: u32, max: u32 },
}

/// Plane grid with positions, normals, texture coordinates, and a triangle index list.
#[derive(Clone, Debug)]
pub struct PlaneGrid {
    width: f32,
    height: f32,
    segments: u32,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl PlaneGrid {
    /// Build a flat grid (elevation 0, normals `+Z`).
    pub fn new(width: f32, height: f32, segments: u32) -> Result<Self, GridError> {
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(GridError::InvalidExtent { width, height });
        }
        if segments == 0 {
            return Err(GridError::ZeroSegments);
        }
        if segments > MAX_SEGMENTS {
            return Err(GridError::TooManySegments {
                segments,
                max: MAX_SEGMENTS,
            });
        }

        let columns = segments + 1;
        let vertex_count = (columns as usize) * (columns as usize);
        let cell_width = width / segments as f32;
        let cell_height = height / segments as f32;
        let half_width = width * 0.5;
        let half_height = height * 0.5;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for iy in 0..columns {
            let y = half_height - iy as f32 * cell_height;
            for ix in 0..columns {
                let x = ix as f32 * cell_width - half_width;
                positions.push([x, y, 0.0]);
                uvs.push([
                    ix as f32 / segments as f32,
                    1.0 - iy as f32 / segments as f32,
                ]);
            }
        }

        let mut indices = Vec::with_capacity(6 * (segments as usize) * (segments as usize));
        for iy in 0..segments {
            for ix in 0..segments {
                let a = ix + columns * iy;
                let b = ix + columns * (iy + 1);
                let c = (ix + 1) + columns * (iy + 1);
                let d = (ix + 1) + columns * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Ok(Self {
            width,
            height,
            segments,
            positions,
            normals: vec![[0.0, 0.0, 1.0]; vertex_count],
            uvs,
            indices,
        })
    }

    /// World-space extent along X.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World-space extent along Y.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Subdivisions per axis.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Vertices per row (and per column).
    pub fn columns(&self) -> u32 {
        self.segments + 1
    }

    /// Always `(segments + 1)^2`.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Flat index of the vertex at column `ix`, row `iy`.
    pub fn vertex_index(&self, ix: u32, iy: u32) -> usize {
        debug_assert!(ix <= self.segments && iy <= self.segments);
        (iy * self.columns() + ix) as usize
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    /// Triangle list, three indices per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Overwrite every vertex's elevation with `elevation(x, y)`.
    ///
    /// `x` and `y` are passed through untouched; the topology never changes.
    pub fn set_elevations(&mut self, mut elevation: impl FnMut(f32, f32) -> f32) {
        for position in &mut self.positions {
            position[2] = elevation(position[0], position[1]);
        }
    }

    /// Recompute smooth per-vertex normals from the current positions.
    pub fn recompute_normals(&mut self) {
        compute_vertex_normals(&self.positions, &self.indices, &mut self.normals);
    }
}
