use super::{CompiledCurve, CurveKind, Profile, ProfilePoint};
use crate::math::lerp_step;
use crate::math::root::bisect_domain_edge;

/// Bisection rounds used to pin down where a curve stops being defined.
const EDGE_ITERATIONS: usize = 40;

/// Samples a curve into drawable polylines, independent of any region.
///
/// `y = f(x)` and `y = c` are sampled across the x-range, `x = g(y)` across
/// the y-range and `x = c` becomes a single vertical segment. Undefined
/// stretches split the output into separate pieces, and every transition
/// between defined and undefined samples is refined by bisection so the
/// piece ends exactly at the domain edge.
pub struct SampleCurve {
    x_range: (f64, f64),
    y_range: (f64, f64),
    steps: usize,
}

impl SampleCurve {
    /// Creates a new `SampleCurve` operation.
    #[must_use]
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), steps: usize) -> Self {
        Self {
            x_range,
            y_range,
            steps: steps.max(1),
        }
    }

    /// Executes the sampling. Points are `(x, y)` in the plane.
    #[must_use]
    pub fn execute(&self, curve: &CompiledCurve) -> Vec<Profile> {
        match curve.kind() {
            CurveKind::XConst => {
                let x = curve.eval(0.0);
                if x.is_finite() {
                    vec![vec![
                        ProfilePoint::new(x, self.y_range.0),
                        ProfilePoint::new(x, self.y_range.1),
                    ]]
                } else {
                    Vec::new()
                }
            }
            CurveKind::YOfX | CurveKind::YConst => {
                self.sample_pieces(|t| curve.eval(t), self.x_range, |t, v| ProfilePoint::new(t, v))
            }
            CurveKind::XOfY => {
                self.sample_pieces(|t| curve.eval(t), self.y_range, |t, v| ProfilePoint::new(v, t))
            }
        }
    }

    /// Samples `f` over `range`, mapping `(parameter, value)` to a point.
    fn sample_pieces<F, P>(&self, f: F, range: (f64, f64), point: P) -> Vec<Profile>
    where
        F: Fn(f64) -> f64,
        P: Fn(f64, f64) -> ProfilePoint,
    {
        let mut pieces = Vec::new();
        let mut current: Profile = Vec::new();
        let mut prev: Option<(f64, f64)> = None;

        for i in 0..=self.steps {
            let t = lerp_step(range.0, range.1, i, self.steps);
            let v = f(t);
            let defined = v.is_finite();

            if let Some((prev_t, prev_v)) = prev {
                match (prev_v.is_finite(), defined) {
                    (false, true) => {
                        let edge = bisect_domain_edge(&f, t, prev_t, EDGE_ITERATIONS);
                        if edge != t {
                            current.push(point(edge, f(edge)));
                        }
                    }
                    (true, false) => {
                        let edge = bisect_domain_edge(&f, prev_t, t, EDGE_ITERATIONS);
                        if edge != prev_t {
                            current.push(point(edge, f(edge)));
                        }
                        pieces.push(std::mem::take(&mut current));
                    }
                    _ => {}
                }
            }

            if defined {
                current.push(point(t, v));
            }
            prev = Some((t, v));
        }

        if !current.is_empty() {
            pieces.push(current);
        }
        pieces.retain(|piece| !piece.is_empty());
        pieces
    }
}
