use crate::operations::{Axis, ComputedRegion};

/// A region sample expressed in the frame of the rotation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshProfilePoint {
    /// Distance from the axis line.
    pub radius: f64,
    /// Coordinate along the axis line.
    pub axis_pos: f64,
}

impl MeshProfilePoint {
    #[must_use]
    pub const fn new(radius: f64, axis_pos: f64) -> Self {
        Self { radius, axis_pos }
    }
}

/// Converts a region into the outer and inner profiles swept by the mesh.
///
/// About `y = k` each sample contributes its farther and nearer distance to
/// the axis; the inner radius drops to 0 when the axis runs between the two
/// curves. About `x = k` both profiles share the radius `|x - k|` and run
/// along the upper and lower curve respectively.
#[must_use]
pub fn mesh_profiles(
    region: &ComputedRegion,
    axis: Axis,
    axis_value: f64,
) -> (Vec<MeshProfilePoint>, Vec<MeshProfilePoint>) {
    region
        .upper_profile
        .iter()
        .zip(&region.lower_profile)
        .map(|(upper, lower)| match axis {
            Axis::X => {
                let du = upper.y - axis_value;
                let dl = lower.y - axis_value;
                let outer = du.abs().max(dl.abs());
                let inner = if du * dl < 0.0 {
                    0.0
                } else {
                    du.abs().min(dl.abs())
                };
                (
                    MeshProfilePoint::new(outer, upper.x),
                    MeshProfilePoint::new(inner, upper.x),
                )
            }
            Axis::Y => {
                let radius = (upper.x - axis_value).abs();
                (
                    MeshProfilePoint::new(radius, upper.y),
                    MeshProfilePoint::new(radius, lower.y),
                )
            }
        })
        .unzip()
}
