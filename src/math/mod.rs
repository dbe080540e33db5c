pub mod integrate;
pub mod interpolate;
pub mod root;

pub use integrate::simpson;
pub use interpolate::ProfileInterpolator;
pub use root::bisect;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns the `i`-th of `steps + 1` evenly spaced samples over `[start, end]`.
///
/// The last sample is exactly `end`, so sweeps never drift past their bound.
#[must_use]
pub fn lerp_step(start: f64, end: f64, i: usize, steps: usize) -> f64 {
    if i >= steps {
        return end;
    }
    #[allow(clippy::cast_precision_loss)]
    let t = i as f64 / steps as f64;
    start + (end - start) * t
}
