//! Smooth vertex normals from an indexed triangle list.

use glam::Vec3;

/// Unnormalized normal of triangle `(a, b, c)`, `(c - b) x (a - b)`.
///
/// Its length is twice the triangle area, so summing these weights each face by area.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - b).cross(a - b)
}

/// Recompute per-vertex normals as the normalized sum of adjacent face normals.
///
/// `normals` must have one entry per position. Vertices with no (or only
/// degenerate) adjacent faces get `+Z`.
pub fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u32], normals: &mut [[f32; 3]]) {
    assert_eq!(
        positions.len(),
        normals.len(),
        "normal buffer must match position buffer"
    );

    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = face_normal(
            Vec3::from(positions[ia]),
            Vec3::from(positions[ib]),
            Vec3::from(positions[ic]),
        );
        accum[ia] += n;
        accum[ib] += n;
        accum[ic] += n;
    }

    for (out, sum) in normals.iter_mut().zip(accum) {
        *out = sum.try_normalize().unwrap_or(Vec3::Z).to_array();
    }
}
