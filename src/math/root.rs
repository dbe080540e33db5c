/// Locates a sign change of `f` inside `[lo, hi]` by bisection.
///
/// `f_lo` is `f(lo)`; the caller has already observed that `f(lo)` and `f(hi)`
/// differ in sign. Non-finite midpoints are treated as belonging to the `hi`
/// side, which keeps the bracket shrinking toward the finite end.
#[must_use]
pub fn bisect<F>(f: F, mut lo: f64, mut hi: f64, mut f_lo: f64, iterations: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    for _ in 0..iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_mid.is_finite() && f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Locates the boundary between a defined and an undefined stretch of `f`.
///
/// `defined` must be a point where `f` is finite and `undefined` a point where
/// it is not (either order along the axis). Returns the last finite point
/// found, so the result can always be evaluated.
#[must_use]
pub fn bisect_domain_edge<F>(f: F, mut defined: f64, mut undefined: f64, iterations: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    for _ in 0..iterations {
        let mid = 0.5 * (defined + undefined);
        if f(mid).is_finite() {
            defined = mid;
        } else {
            undefined = mid;
        }
    }
    defined
}
