use crate::math::{Point3, Vector3};

/// Smooth per-vertex normals by area-weighted face normal accumulation.
///
/// Each triangle adds its unnormalized edge cross product to its three
/// vertices; the sums are then normalized. Degenerate triangles add a zero
/// vector, and a vertex whose sum is zero keeps a zero normal.
#[must_use]
pub fn accumulate_normals(positions: &[Point3], triangles: &[[u32; 3]]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); positions.len()];
    for tri in triangles {
        let [a, b, c] = tri.map(|i| i as usize);
        let face = (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for n in &mut normals {
        *n = n.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
    }
    normals
}
