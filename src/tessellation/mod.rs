mod normals;
mod profile;
mod revolution;

pub use normals::accumulate_normals;
pub use profile::{mesh_profiles, MeshProfilePoint};
pub use revolution::RevolveMesh;

use std::f64::consts::TAU;

use crate::curve::Color;
use crate::math::{Point3, Vector3};

/// Parameters controlling revolution mesh generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    /// Number of angular steps in the sweep.
    pub angular_segments: usize,
    /// Swept angle in radians, clamped to `[0, 2π]`. Values below `2π`
    /// produce an open, partially revolved surface.
    pub angle_extent: f64,
    /// When set, a per-vertex color buffer is produced from this base color.
    pub color: Option<Color>,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            angular_segments: 64,
            angle_extent: TAU,
            color: None,
        }
    }
}

impl MeshParams {
    #[must_use]
    pub fn with_segments(mut self, angular_segments: usize) -> Self {
        self.angular_segments = angular_segments;
        self
    }

    #[must_use]
    pub fn with_angle_extent(mut self, angle_extent: f64) -> Self {
        self.angle_extent = angle_extent;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Flat, renderer-ready buffers of a triangulated surface of revolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevolutionMesh {
    /// `xyz` per vertex.
    pub positions: Vec<f32>,
    /// Vertex indices, three per triangle.
    pub indices: Vec<u32>,
    /// Unit normal per vertex; zero where every adjacent triangle is degenerate.
    pub normals: Vec<f32>,
    /// `rgb` per vertex in `[0, 1]`.
    pub colors: Option<Vec<f32>>,
}

impl RevolutionMesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`.
    #[must_use]
    pub fn position(&self, i: usize) -> Point3 {
        let p = &self.positions[3 * i..3 * i + 3];
        Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
    }

    /// Normal of vertex `i`.
    #[must_use]
    pub fn normal(&self, i: usize) -> Vector3 {
        let n = &self.normals[3 * i..3 * i + 3];
        Vector3::new(f64::from(n[0]), f64::from(n[1]), f64::from(n[2]))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn push_vec(buffer: &mut Vec<f32>, x: f64, y: f64, z: f64) {
    buffer.extend_from_slice(&[x as f32, y as f32, z as f32]);
}
