//! Terrain construction errors.

use verdant_mesh::GridError;

/// Reasons a [`crate::HeightfieldMesh`] cannot be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The grid extent or subdivision count is invalid.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A noise constant is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// The time step must move the cursor forward.
    #[error("time_step must be positive, got {0}")]
    NonPositiveTimeStep(f64),
}
