use crate::curve::ProfilePoint;

/// Piecewise-linear view over a profile sorted by ascending x.
///
/// Queries outside the sampled range clamp to the first or last sample.
/// An empty profile evaluates to NaN everywhere.
#[derive(Debug, Clone, Copy)]
pub struct ProfileInterpolator<'a> {
    points: &'a [ProfilePoint],
}

impl<'a> ProfileInterpolator<'a> {
    /// Wraps a profile; the points must already be sorted by x.
    #[must_use]
    pub fn new(points: &'a [ProfilePoint]) -> Self {
        Self { points }
    }

    /// Interpolated y at `x`.
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return f64::NAN;
        };
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // First index whose x is >= target; the bracket is [hi - 1, hi].
        let hi = self.points.partition_point(|p| p.x < x);
        let p1 = self.points[hi];
        let p0 = self.points[hi - 1];
        let span = p1.x - p0.x;
        if span <= 0.0 {
            return p1.y;
        }
        p0.y + (p1.y - p0.y) * (x - p0.x) / span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Vec<ProfilePoint> {
        vec![
            ProfilePoint::new(0.0, 0.0),
            ProfilePoint::new(1.0, 2.0),
            ProfilePoint::new(3.0, 0.0),
        ]
    }

    #[test]
    fn interpolates_inside() {
        let pts = profile();
        let f = ProfileInterpolator::new(&pts);
        assert!((f.at(0.5) - 1.0).abs() < 1e-12);
        assert!((f.at(2.0) - 1.0).abs() < 1e-12);
        assert!((f.at(1.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside() {
        let pts = profile();
        let f = ProfileInterpolator::new(&pts);
        assert!((f.at(-4.0) - 0.0).abs() < 1e-12);
        assert!((f.at(10.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn empty_profile_is_undefined() {
        let f = ProfileInterpolator::new(&[]);
        assert!(f.at(0.0).is_nan());
    }
}
