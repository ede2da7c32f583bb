//! Height-coupled random placement.

use std::f32::consts::PI;

use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use verdant_terrain::HeightSample;

use crate::ScatterParams;

/// Where and how one instance is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementTransform {
    /// `(x, elevation + offset, y)` in terrain world space.
    pub position: Vec3,
    /// Rotation around +Y, in radians, within `[0, π)`.
    pub yaw: f32,
    pub scale: Vec3,
}

impl PlacementTransform {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Scale, then yaw, then translate.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.position)
    }
}

/// Place `params.count()` instances on the terrain described by `sample`.
///
/// For each instance `x` and `y` are drawn uniformly over the centered region,
/// normalized by the extent, and the sampled elevation plus `offset` becomes the
/// vertical coordinate. The ground-plane `y` lands in `position.z`.
pub fn scatter<R: Rng + ?Sized>(
    sample: &HeightSample,
    params: &ScatterParams,
    rng: &mut R,
) -> Vec<PlacementTransform> {
    let width = params.width();
    let height = params.height();
    let half_width = width * 0.5;
    let half_height = height * 0.5;

    (0..params.count())
        .map(|_| {
            let x = rng.random_range(-half_width..half_width);
            let y = rng.random_range(-half_height..half_height);
            let elevation =
                sample.elevation(f64::from(x) / f64::from(width), f64::from(y) / f64::from(height));

            PlacementTransform {
                position: Vec3::new(x, elevation as f32 + params.offset(), y),
                yaw: rng.random_range(0.0..PI),
                scale: params.scale(),
            }
        })
        .collect()
}
