/// Composite Simpson's 1/3 rule for `f` over `[a, b]`.
///
/// `intervals` is rounded up to the next even number (minimum 2). Samples
/// where `f` is not finite contribute zero instead of poisoning the sum.
#[must_use]
pub fn simpson<F>(f: F, a: f64, b: f64, intervals: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = intervals.max(2).next_multiple_of(2);
    #[allow(clippy::cast_precision_loss)]
    let h = (b - a) / n as f64;
    let sample = |i: usize| {
        #[allow(clippy::cast_precision_loss)]
        let x = if i == n { b } else { a + h * i as f64 };
        let v = f(x);
        if v.is_finite() {
            v
        } else {
            0.0
        }
    };

    let mut sum = sample(0) + sample(n);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * sample(i);
    }
    sum * h / 3.0
}
