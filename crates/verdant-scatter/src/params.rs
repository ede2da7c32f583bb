//! Validated scatter constants.

use glam::Vec3;

/// Reasons a [`ScatterParams`] cannot be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScatterError {
    /// Instance count must be at least one.
    #[error("instance count must be positive")]
    ZeroCount,

    /// Scatter region must be positive and finite.
    #[error("scatter extent must be positive and finite, got {width} x {height}")]
    InvalidExtent { width: f32, height: f32 },

    /// Vertical offset is NaN or infinite.
    #[error("offset must be finite, got {0}")]
    NonFiniteOffset(f32),

    /// Every scale component must be positive and finite.
    #[error("scale components must be positive and finite, got {0}")]
    InvalidScale(Vec3),
}

/// Region, count, and per-instance constants for a placement run.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterParams {
    width: f32,
    height: f32,
    count: u32,
    offset: f32,
    scale: Vec3,
}

impl ScatterParams {
    /// Validate and build scatter parameters.
    ///
    /// `width` and `height` should match the terrain extent so normalized
    /// sample coordinates line up with the mesh.
    pub fn new(
        width: f32,
        height: f32,
        count: u32,
        offset: f32,
        scale: Vec3,
    ) -> Result<Self, ScatterError> {
        if count == 0 {
            return Err(ScatterError::ZeroCount);
        }
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(ScatterError::InvalidExtent { width, height });
        }
        if !offset.is_finite() {
            return Err(ScatterError::NonFiniteOffset(offset));
        }
        if !(scale.is_finite() && scale.min_element() > 0.0) {
            return Err(ScatterError::InvalidScale(scale));
        }
        Ok(Self {
            width,
            height,
            count,
            offset,
            scale,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of instances each run produces.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Vertical bias keeping the instance base above the ground.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}

impl Default for ScatterParams {
    /// 5000 thin, tall instances over a 50 x 50 patch, lifted by 0.5.
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            count: 5000,
            offset: 0.5,
            scale: Vec3::new(0.2, 1.0, 0.2),
        }
    }
}
