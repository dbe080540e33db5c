use std::f64::consts::TAU;

use tracing::debug;

use super::{
    accumulate_normals, mesh_profiles, push_vec, MeshParams, MeshProfilePoint, RevolutionMesh,
};
use crate::error::{MeshError, Result};
use crate::math::{lerp_step, Point3};
use crate::operations::{Axis, ComputedRegion};

/// Brightness of the inner wall relative to the base color.
const INNER_SHADE: f32 = 0.7;

/// Sweeps a region around an axis line into a triangle mesh.
///
/// The outer profile (forward) and the inner profile (reversed) form one
/// closed loop of `L = 2 * region.len()` vertices. The loop is copied onto
/// `angular_segments + 1` rings and consecutive rings are stitched with two
/// triangles per loop edge, the closing edge included, so the mesh has
/// `6 * L * angular_segments` indices. Triangle winding follows the loop's
/// orientation in the profile plane so faces point out of the solid on
/// either side of the axis.
pub struct RevolveMesh {
    axis: Axis,
    axis_value: f64,
    params: MeshParams,
}

impl RevolveMesh {
    /// Creates a new `RevolveMesh` operation about the given axis line.
    #[must_use]
    pub fn new(axis: Axis, axis_value: f64) -> Self {
        Self {
            axis,
            axis_value,
            params: MeshParams::default(),
        }
    }

    /// Sets custom mesh parameters.
    #[must_use]
    pub fn with_params(mut self, params: MeshParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the sweep.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidParameters`] for zero segments, a non-finite
    ///   angle or axis offset, or a mesh too large for 32-bit indices
    /// - [`MeshError::ProfileTooShort`] if the region has fewer than 2 samples
    pub fn execute(&self, region: &ComputedRegion) -> Result<RevolutionMesh> {
        let segments = self.params.angular_segments;
        if segments == 0 {
            return Err(invalid("angular_segments must be at least 1"));
        }
        if !self.params.angle_extent.is_finite() {
            return Err(invalid("angle_extent must be finite"));
        }
        if !self.axis_value.is_finite() {
            return Err(invalid("axis offset must be finite"));
        }
        if region.len() < 2 {
            return Err(MeshError::ProfileTooShort(region.len()).into());
        }
        let extent = self.params.angle_extent.clamp(0.0, TAU);

        let (outer, inner) = mesh_profiles(region, self.axis, self.axis_value);
        let ring: Vec<MeshProfilePoint> = outer
            .iter()
            .chain(inner.iter().rev())
            .copied()
            .collect();
        let ring_len = ring.len();
        let vertex_count = ring_len * (segments + 1);
        if u32::try_from(vertex_count).is_err() {
            return Err(invalid("mesh exceeds 32-bit index range"));
        }

        let mut points = Vec::with_capacity(vertex_count);
        for j in 0..=segments {
            let (sin, cos) = lerp_step(0.0, extent, j, segments).sin_cos();
            points.extend(ring.iter().map(|p| self.place(p, cos, sin)));
        }

        let triangles = stitch(ring_len, segments, self.winds_inward(&ring));
        let normals = accumulate_normals(&points, &triangles);

        let mut mesh = RevolutionMesh {
            positions: Vec::with_capacity(3 * vertex_count),
            indices: triangles.iter().flatten().copied().collect(),
            normals: Vec::with_capacity(3 * vertex_count),
            colors: None,
        };
        for p in &points {
            push_vec(&mut mesh.positions, p.x, p.y, p.z);
        }
        for n in &normals {
            push_vec(&mut mesh.normals, n.x, n.y, n.z);
        }
        if let Some(color) = self.params.color {
            let base = color.to_unit();
            let shade = base.map(|c| c * INNER_SHADE);
            let ring_colors: Vec<[f32; 3]> = (0..ring_len)
                .map(|i| if i < outer.len() { base } else { shade })
                .collect();
            mesh.colors = Some(
                (0..=segments)
                    .flat_map(|_| ring_colors.iter().flatten().copied())
                    .collect(),
            );
        }

        debug!(
            axis = ?self.axis,
            axis_value = self.axis_value,
            segments,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "revolved mesh"
        );
        Ok(mesh)
    }

    /// Whether the default stitch order would face into the solid.
    ///
    /// The sweep frame `(axis, radial, tangential)` is right-handed about
    /// `y = k` and left-handed about `x = k`, so the outward loop
    /// orientation differs between the two axes.
    fn winds_inward(&self, ring: &[MeshProfilePoint]) -> bool {
        let area = signed_area(ring);
        match self.axis {
            Axis::X => area > 0.0,
            Axis::Y => area < 0.0,
        }
    }

    /// Places a profile point on the ring at angle `θ` given `cos θ`, `sin θ`.
    fn place(&self, p: &MeshProfilePoint, cos: f64, sin: f64) -> Point3 {
        let k = self.axis_value;
        match self.axis {
            Axis::X => Point3::new(p.axis_pos, k + p.radius * cos, p.radius * sin),
            Axis::Y => Point3::new(k + p.radius * cos, p.axis_pos, p.radius * sin),
        }
    }
}

fn invalid(message: &str) -> crate::error::LatheError {
    MeshError::InvalidParameters(message.to_string()).into()
}

/// Twice the signed area of the loop in the `(axis_pos, radius)` plane,
/// positive when counter-clockwise.
fn signed_area(ring: &[MeshProfilePoint]) -> f64 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(p, q)| p.axis_pos * q.radius - q.axis_pos * p.radius)
        .sum()
}

/// Two triangles per loop edge between consecutive rings.
#[allow(clippy::cast_possible_truncation)]
fn stitch(ring_len: usize, segments: usize, flip: bool) -> Vec<[u32; 3]> {
    let mut triangles = Vec::with_capacity(2 * ring_len * segments);
    for j in 0..segments {
        for i in 0..ring_len {
            let next = (i + 1) % ring_len;
            let a = (j * ring_len + i) as u32;
            let b = (j * ring_len + next) as u32;
            let c = ((j + 1) * ring_len + next) as u32;
            let d = ((j + 1) * ring_len + i) as u32;
            if flip {
                triangles.push([a, b, c]);
                triangles.push([a, c, d]);
            } else {
                triangles.push([a, c, b]);
                triangles.push([a, d, c]);
            }
        }
    }
    triangles
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::context::EvalContext;
    use crate::curve::{Color, Curve, ProfilePoint};
    use crate::error::LatheError;
    use crate::math::Vector3;
    use crate::operations::ComputeRegion;

    fn region(equations: &[&str], x_min: f64, x_max: f64, resolution: usize) -> ComputedRegion {
        let curves: Vec<Curve> = equations
            .iter()
            .map(|e| Curve::from_equation(e).unwrap())
            .collect();
        ComputeRegion::new(x_min, x_max)
            .with_resolution(resolution)
            .execute(&curves, &mut EvalContext::default())
            .unwrap()
    }

    fn params(segments: usize) -> MeshParams {
        MeshParams::default().with_segments(segments)
    }

    fn revolve(r: &ComputedRegion, axis: Axis, axis_value: f64, segments: usize) -> RevolutionMesh {
        RevolveMesh::new(axis, axis_value)
            .with_params(params(segments))
            .execute(r)
            .unwrap()
    }

    #[test]
    fn buffer_sizes() {
        let r = region(&["y = x^2", "y = 4"], -2.0, 2.0, 50);
        let mesh = RevolveMesh::new(Axis::X, 0.0)
            .with_params(params(16))
            .execute(&r)
            .unwrap();
        let loop_len = 2 * r.len();
        assert_eq!(mesh.indices.len(), 6 * loop_len * 16);
        assert_eq!(mesh.vertex_count(), loop_len * 17);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert!(mesh.colors.is_none());
        let max_index = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max_index < mesh.vertex_count());
    }

    #[test]
    fn normals_are_unit_or_zero() {
        let r = region(&["y = x^2", "y = x"], 0.0, 1.0, 40);
        for axis in [Axis::X, Axis::Y] {
            let mesh = revolve(&r, axis, -1.0, 24);
            for i in 0..mesh.vertex_count() {
                let len = mesh.normal(i).norm();
                assert!(len == 0.0 || (len - 1.0).abs() < 1e-5, "normal {i} has length {len}");
            }
        }
    }

    #[test]
    fn vertices_lie_at_their_radius() {
        let r = region(&["y = 3", "y = 1"], 0.0, 2.0, 4);
        let mesh = revolve(&r, Axis::X, 0.0, 8);
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let radius = p.y.hypot(p.z);
            assert!((radius - 3.0).abs() < 1e-5 || (radius - 1.0).abs() < 1e-5);
            assert!((-1e-6..=2.0 + 1e-6).contains(&p.x));
        }
    }

    #[test]
    fn outer_wall_normals_point_away_from_axis() {
        let r = region(&["y = 3", "y = 1"], 0.0, 2.0, 4);
        let mesh = revolve(&r, Axis::X, 0.0, 8);
        // ring 4 of 8 is at θ = π; its vertex 2 sits mid-way along the outer wall
        let v = 4 * 2 * r.len() + 2;
        assert!((mesh.position(v) - Point3::new(1.0, -3.0, 0.0)).norm() < 1e-5);
        assert!((mesh.normal(v) + Vector3::y()).norm() < 1e-5);
    }

    /// Fraction of interior outer-wall vertices whose normal points up.
    fn upward_outer_normals(x_min: f64, x_max: f64) -> f64 {
        let r = region(&["y = 3", "y = 1"], x_min, x_max, 4);
        let mesh = revolve(&r, Axis::Y, 0.0, 16);
        let ring_len = 2 * r.len();
        let mut total = 0_u32;
        let mut upward = 0_u32;
        for j in 0..=16 {
            for i in 1..r.len() - 1 {
                total += 1;
                if mesh.normal(j * ring_len + i).y > 0.0 {
                    upward += 1;
                }
            }
        }
        f64::from(upward) / f64::from(total)
    }

    #[test]
    fn vertical_axis_normals_face_out_on_both_sides() {
        // the top wall y = 3 faces +y whichever side of x = 0 the band lies
        assert_eq!(upward_outer_normals(1.0, 2.0), 1.0);
        assert_eq!(upward_outer_normals(-2.0, -1.0), 1.0);
    }

    #[test]
    fn loop_area_sign_follows_orientation() {
        let ccw = [
            MeshProfilePoint::new(0.0, 0.0),
            MeshProfilePoint::new(0.0, 1.0),
            MeshProfilePoint::new(1.0, 1.0),
            MeshProfilePoint::new(1.0, 0.0),
        ];
        // (axis_pos, radius): (0,0) (1,0) (1,1) (0,1)
        assert!((signed_area(&ccw) - 2.0).abs() < 1e-12);
        let mut cw = ccw;
        cw.reverse();
        assert!((signed_area(&cw) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn vertical_axis_places_rings_around_it() {
        let r = region(&["y = 1", "y = 0"], 1.0, 2.0, 2);
        let mesh = revolve(&r, Axis::Y, 0.5, 4);
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let radius = (p.x - 0.5).hypot(p.z);
            assert!((0.5 - 1e-5..=1.5 + 1e-5).contains(&radius));
            assert!((-1e-6..=1.0 + 1e-6).contains(&p.y));
        }
    }

    #[test]
    fn axis_inside_region_collapses_inner_wall() {
        let r = region(&["y = 1", "y = -1"], 0.0, 1.0, 4);
        let mesh = revolve(&r, Axis::X, 0.0, 6);
        let ring_len = 2 * r.len();
        // inner loop vertices sit on the axis itself
        for i in r.len()..ring_len {
            let p = mesh.position(i);
            assert!(p.y.abs() < 1e-6 && p.z.abs() < 1e-6);
        }
    }

    #[test]
    fn partial_sweep_ends_at_extent() {
        let r = region(&["y = 2", "y = 1"], 0.0, 1.0, 2);
        let mesh = RevolveMesh::new(Axis::X, 0.0)
            .with_params(params(4).with_angle_extent(std::f64::consts::FRAC_PI_2))
            .execute(&r)
            .unwrap();
        let last_ring = 4 * 2 * r.len();
        let p = mesh.position(last_ring);
        // θ = π/2 sends the outer radius onto +z
        assert!(p.y.abs() < 1e-5);
        assert!((p.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn colors_follow_the_loop() {
        let r = region(&["y = 2", "y = 1"], 0.0, 1.0, 2);
        let color = Color::from_hex(0xff_80_00);
        let mesh = RevolveMesh::new(Axis::X, 0.0)
            .with_params(params(3).with_color(color))
            .execute(&r)
            .unwrap();
        let colors = mesh.colors.unwrap();
        assert_eq!(colors.len(), mesh.positions.len());
        assert_eq!(&colors[0..3], &color.to_unit());
        let inner = 3 * r.len();
        assert!((colors[inner] - color.to_unit()[0] * INNER_SHADE).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_parameters() {
        let r = region(&["y = 2", "y = 1"], 0.0, 1.0, 2);
        let zero = RevolveMesh::new(Axis::X, 0.0).with_params(params(0)).execute(&r);
        assert!(matches!(zero, Err(LatheError::Mesh(MeshError::InvalidParameters(_)))));
        let nan = RevolveMesh::new(Axis::X, 0.0)
            .with_params(params(4).with_angle_extent(f64::NAN))
            .execute(&r);
        assert!(matches!(nan, Err(LatheError::Mesh(MeshError::InvalidParameters(_)))));
    }

    #[test]
    fn rejects_single_sample_region() {
        let r = ComputedRegion {
            upper_profile: vec![ProfilePoint::new(0.0, 1.0)],
            lower_profile: vec![ProfilePoint::new(0.0, 0.0)],
            x_min: 0.0,
            x_max: 0.0,
            spans: Vec::new(),
        };
        let err = RevolveMesh::new(Axis::X, 0.0).execute(&r).unwrap_err();
        assert!(matches!(err, LatheError::Mesh(MeshError::ProfileTooShort(1))));
    }
}
