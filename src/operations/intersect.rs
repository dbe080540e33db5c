use crate::math::{bisect, lerp_step, TOLERANCE};

/// Below this magnitude a difference sample counts as a touching point.
pub const TOUCH_EPSILON: f64 = TOLERANCE;

/// Finds x-positions where two functions `y(x)` meet.
///
/// Scans `f1 - f2` at evenly spaced samples; each sign change between
/// neighbouring samples is refined by bisection, and samples whose
/// difference is already below [`TOUCH_EPSILON`] are recorded as
/// tangencies. Undefined samples are skipped. The result is in scan order
/// and may hold near-duplicates; see [`dedup_by_proximity`].
pub struct FindIntersections {
    x_min: f64,
    x_max: f64,
    steps: usize,
    bisection_iterations: usize,
}

impl FindIntersections {
    /// Creates a new `FindIntersections` query over `[x_min, x_max]`.
    #[must_use]
    pub fn new(x_min: f64, x_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            steps: 1000,
            bisection_iterations: 50,
        }
    }

    /// Sets the number of scan intervals.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps.max(1);
        self
    }

    /// Sets the number of bisection rounds per bracketed crossing.
    #[must_use]
    pub fn with_bisection_iterations(mut self, iterations: usize) -> Self {
        self.bisection_iterations = iterations;
        self
    }

    /// Executes the scan.
    #[must_use]
    pub fn execute<F1, F2>(&self, f1: F1, f2: F2) -> Vec<f64>
    where
        F1: Fn(f64) -> f64,
        F2: Fn(f64) -> f64,
    {
        let diff = |x: f64| f1(x) - f2(x);
        let mut found = Vec::new();

        let mut x0 = self.x_min;
        let mut d0 = diff(x0);
        for i in 1..=self.steps {
            let x1 = lerp_step(self.x_min, self.x_max, i, self.steps);
            let d1 = diff(x1);

            if d0.is_finite() && d1.is_finite() {
                if d0.abs() < TOUCH_EPSILON {
                    found.push(x0);
                } else if d1.abs() >= TOUCH_EPSILON && d0.signum() != d1.signum() {
                    found.push(bisect(diff, x0, x1, d0, self.bisection_iterations));
                }
            }

            x0 = x1;
            d0 = d1;
        }
        if d0.is_finite() && d0.abs() < TOUCH_EPSILON {
            found.push(x0);
        }

        found
    }
}

/// Sorts `values` and merges entries closer than `epsilon` to their
/// predecessor, keeping the first of each cluster.
#[must_use]
pub fn dedup_by_proximity(mut values: Vec<f64>, epsilon: f64) -> Vec<f64> {
    values.retain(|v| v.is_finite());
    values.sort_by(f64::total_cmp);
    let mut out: Vec<f64> = Vec::with_capacity(values.len());
    for v in values {
        match out.last() {
            Some(&last) if (v - last).abs() < epsilon => {}
            _ => out.push(v),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots(found: &[f64], expected: &[f64], tol: f64) {
        for e in expected {
            assert!(
                found.iter().any(|f| (f - e).abs() < tol),
                "missing root {e} in {found:?}"
            );
        }
        for f in found {
            assert!(
                expected.iter().any(|e| (f - e).abs() < tol),
                "unexpected root {f} in {found:?}"
            );
        }
    }

    #[test]
    fn line_and_parabola() {
        let found = FindIntersections::new(-2.0, 2.0)
            .with_steps(500)
            .execute(|x| x, |x| x * x);
        assert_roots(&found, &[0.0, 1.0], 1e-9);
    }

    #[test]
    fn crossing_between_samples_is_refined() {
        let found = FindIntersections::new(0.0, 3.0)
            .with_steps(7)
            .execute(|x| x * x, |_| 2.0);
        assert_eq!(found.len(), 1);
        assert!((found[0] - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn tangency_without_sign_change() {
        // x^2 touches 0 at x = 0 without crossing; 0 is a sample point
        let found = FindIntersections::new(-1.0, 1.0)
            .with_steps(100)
            .execute(|x| x * x, |_| 0.0);
        assert_roots(&found, &[0.0], 1e-9);
    }

    #[test]
    fn undefined_samples_are_skipped() {
        let found = FindIntersections::new(-4.0, 4.0)
            .with_steps(400)
            .execute(|x: f64| x.sqrt(), |_| 1.0);
        assert_roots(&found, &[1.0], 1e-9);
    }

    #[test]
    fn parallel_curves_have_no_intersections() {
        let found = FindIntersections::new(-5.0, 5.0).execute(|x| x, |x| x + 1.0);
        assert!(found.is_empty());
    }

    #[test]
    fn dedup_merges_close_values() {
        let merged = dedup_by_proximity(vec![1.0, 0.0, 1.0 + 1e-9, f64::NAN, -0.5, 1e-12], 1e-6);
        assert_eq!(merged, vec![-0.5, 0.0, 1.0]);
    }
}
