mod tracker;

pub use tracker::{BoundaryPair, BoundaryTracker, Candidate};

use tracing::debug;

use crate::context::EvalContext;
use crate::curve::{Curve, CurveFunction, CurveId, CurveKind, InverseParams, Profile, ProfilePoint};
use crate::error::{RegionError, Result};
use crate::math::lerp_step;

/// Parameters for [`ComputeRegion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionParams {
    /// Number of sweep intervals across the effective x-range.
    pub resolution: usize,
    /// Sampling window for `x = g(y)` curves.
    pub inverse: InverseParams,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            resolution: 200,
            inverse: InverseParams::default(),
        }
    }
}

/// A curve that bounds part of the region.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCurve {
    /// Position in the input curve list.
    pub index: usize,
    pub id: CurveId,
    pub expression: String,
}

/// A maximal x-run during which one boundary pair is active.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySpan {
    pub x_start: f64,
    pub x_end: f64,
    pub upper: BoundaryCurve,
    pub lower: BoundaryCurve,
}

/// The region enclosed between the curves over an x-range.
///
/// `upper_profile[i].x == lower_profile[i].x` for every `i`. `x_min`/`x_max`
/// are the bounds after clipping by vertical lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedRegion {
    pub upper_profile: Profile,
    pub lower_profile: Profile,
    pub x_min: f64,
    pub x_max: f64,
    pub spans: Vec<BoundarySpan>,
}

impl ComputedRegion {
    /// Number of samples in each profile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.upper_profile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upper_profile.is_empty()
    }

    /// x-extent actually covered by samples.
    #[must_use]
    pub fn sampled_range(&self) -> Option<(f64, f64)> {
        Some((self.upper_profile.first()?.x, self.upper_profile.last()?.x))
    }

    /// Area between the profiles by the trapezoid rule.
    #[must_use]
    pub fn area(&self) -> f64 {
        let heights: Vec<(f64, f64)> = self
            .upper_profile
            .iter()
            .zip(&self.lower_profile)
            .map(|(u, l)| (u.x, u.y - l.y))
            .collect();
        heights
            .windows(2)
            .map(|w| 0.5 * (w[1].0 - w[0].0) * (w[0].1.abs() + w[1].1.abs()))
            .sum()
    }
}

/// Computes the region enclosed between two or more curves.
///
/// Vertical lines (`x = c`) clip the sweep range when there are at least two
/// of them. Every other curve is evaluated as `y(x)` (through a numeric
/// inverse for `x = g(y)`), and a [`BoundaryTracker`] follows the active pair
/// of curves from left to right.
pub struct ComputeRegion {
    x_min: f64,
    x_max: f64,
    params: RegionParams,
}

impl ComputeRegion {
    /// Creates a new `ComputeRegion` operation over `[x_min, x_max]`.
    #[must_use]
    pub fn new(x_min: f64, x_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            params: RegionParams::default(),
        }
    }

    /// Sets all parameters.
    #[must_use]
    pub fn with_params(mut self, params: RegionParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the number of sweep intervals.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.params.resolution = resolution;
        self
    }

    /// Executes the sweep.
    ///
    /// Curves that fail to compile are skipped and reported through
    /// `ctx.diagnostics`; `x = g(y)` curves without a usable inverse are
    /// treated as undefined everywhere.
    ///
    /// # Errors
    ///
    /// - [`RegionError::TooFewCurves`] with fewer than two (usable) curves
    /// - [`RegionError::EmptyBounds`] if the range is empty before or after clipping
    /// - [`RegionError::NoValidRegion`] if fewer than two steps had a boundary
    pub fn execute(&self, curves: &[Curve], ctx: &mut EvalContext) -> Result<ComputedRegion> {
        if curves.len() < 2 {
            return Err(RegionError::TooFewCurves(curves.len()).into());
        }
        if !(self.x_min.is_finite() && self.x_max.is_finite() && self.x_min < self.x_max) {
            return Err(empty_bounds(self.x_min, self.x_max));
        }

        let compiled: Vec<(usize, _)> = curves
            .iter()
            .enumerate()
            .filter_map(|(index, curve)| ctx.compile_or_report(curve).map(|c| (index, c)))
            .collect();
        if compiled.len() < 2 {
            return Err(RegionError::TooFewCurves(compiled.len()).into());
        }

        let verticals: Vec<f64> = compiled
            .iter()
            .filter(|(_, c)| c.kind() == CurveKind::XConst)
            .filter_map(|(_, c)| c.constant())
            .filter(|v| v.is_finite())
            .collect();
        let (x_min, x_max) = clip_to_verticals(self.x_min, self.x_max, &verticals);
        if x_min >= x_max {
            return Err(empty_bounds(x_min, x_max));
        }

        let functions: Vec<(usize, CurveFunction)> = compiled
            .iter()
            .filter_map(|(index, c)| {
                c.to_y_of_x(&self.params.inverse, &mut ctx.diagnostics)
                    .map(|f| (*index, f))
            })
            .collect();

        let steps = self.params.resolution.max(1);
        let mut tracker = BoundaryTracker::new();
        let mut upper_profile = Vec::with_capacity(steps + 1);
        let mut lower_profile = Vec::with_capacity(steps + 1);
        let mut spans: Vec<BoundarySpan> = Vec::new();
        let mut values = Vec::with_capacity(functions.len());

        for i in 0..=steps {
            let x = lerp_step(x_min, x_max, i, steps);
            values.clear();
            values.extend(functions.iter().map(|(index, f)| (*index, f.y_at(x))));

            let Some(chosen) = tracker.step(&values) else {
                continue;
            };
            upper_profile.push(ProfilePoint::new(x, chosen.upper_y));
            lower_profile.push(ProfilePoint::new(x, chosen.lower_y));
            extend_spans(&mut spans, curves, chosen.pair, x);
        }

        if upper_profile.len() < 2 {
            return Err(RegionError::NoValidRegion.into());
        }

        debug!(
            x_min,
            x_max,
            points = upper_profile.len(),
            spans = spans.len(),
            "computed region"
        );

        Ok(ComputedRegion {
            upper_profile,
            lower_profile,
            x_min,
            x_max,
            spans,
        })
    }
}

fn empty_bounds(x_min: f64, x_max: f64) -> crate::error::LatheError {
    RegionError::EmptyBounds { x_min, x_max }.into()
}

/// Two or more vertical lines narrow the range to their extent; a single
/// one cannot close a region on its own and is ignored.
fn clip_to_verticals(x_min: f64, x_max: f64, verticals: &[f64]) -> (f64, f64) {
    if verticals.len() < 2 {
        return (x_min, x_max);
    }
    let lo = verticals.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = verticals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (x_min.max(lo), x_max.min(hi))
}

fn extend_spans(spans: &mut Vec<BoundarySpan>, curves: &[Curve], pair: BoundaryPair, x: f64) {
    if let Some(last) = spans.last_mut() {
        if last.lower.index == pair.lower && last.upper.index == pair.upper {
            last.x_end = x;
            return;
        }
    }
    // Spans tile the sampled range: a new span starts where the last one ended.
    let x_start = spans.last().map_or(x, |last| last.x_end);
    let describe = |index: usize| BoundaryCurve {
        index,
        id: curves[index].id,
        expression: curves[index].expression.clone(),
    };
    spans.push(BoundarySpan {
        x_start,
        x_end: x,
        upper: describe(pair.upper),
        lower: describe(pair.lower),
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LatheError;

    fn curves(equations: &[&str]) -> Vec<Curve> {
        equations
            .iter()
            .map(|e| Curve::from_equation(e).unwrap())
            .collect()
    }

    fn region(equations: &[&str], x_min: f64, x_max: f64) -> Result<ComputedRegion> {
        ComputeRegion::new(x_min, x_max).execute(&curves(equations), &mut EvalContext::default())
    }

    #[test]
    fn parabola_under_horizontal_line() {
        let r = region(&["y = x^2", "y = 4"], -2.0, 2.0).unwrap();
        assert_eq!(r.len(), 201);
        assert_eq!(r.lower_profile.len(), r.upper_profile.len());
        for (u, l) in r.upper_profile.iter().zip(&r.lower_profile) {
            assert_eq!(u.x, l.x);
            assert!((u.y - 4.0).abs() < 1e-12);
            assert!((l.y - l.x * l.x).abs() < 1e-12);
        }
        assert_eq!(r.spans.len(), 1);
        assert_eq!(r.spans[0].upper.expression, "4");
        assert_eq!(r.spans[0].lower.expression, "x^2");
        assert!((r.area() - 32.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn crossing_curves_keep_tracking_the_same_pair() {
        // y = x and y = x^2 cross at x = 1; the pair flips order there
        let r = region(&["y = x", "y = x^2"], 0.5, 2.0).unwrap();
        assert_eq!(r.len(), 201);
        assert_eq!(r.spans.len(), 2);
        assert_eq!(r.spans[0].upper.index, 0);
        assert_eq!(r.spans[1].upper.index, 1);
        assert!((r.spans[0].x_end - 1.0).abs() < 0.02);
        assert!((r.spans[1].x_start - 1.0).abs() < 0.02);
        for (u, l) in r.upper_profile.iter().zip(&r.lower_profile) {
            assert!(u.y >= l.y);
        }
    }

    #[test]
    fn vertical_lines_clip_bounds() {
        let r = region(&["y = x^2", "y = 0", "x = 1", "x = 3"], -10.0, 2.0).unwrap();
        assert!((r.x_min - 1.0).abs() < 1e-12);
        assert!((r.x_max - 2.0).abs() < 1e-12);
        assert!((r.upper_profile[0].x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_vertical_line_does_not_clip() {
        let r = region(&["y = x^2", "y = 0", "x = 1"], -1.0, 2.0).unwrap();
        assert!((r.x_min + 1.0).abs() < 1e-12);
        assert!((r.x_max - 2.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_verticals_yield_empty_bounds() {
        let err = region(&["y = x", "y = 0", "x = 5", "x = 6"], 0.0, 2.0).unwrap_err();
        assert!(matches!(err, LatheError::Region(RegionError::EmptyBounds { .. })));
    }

    #[test]
    fn requires_two_curves() {
        let err = region(&["y = x"], 0.0, 1.0).unwrap_err();
        assert!(matches!(err, LatheError::Region(RegionError::TooFewCurves(1))));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = region(&["y = x", "y = 1"], 2.0, 1.0).unwrap_err();
        assert!(matches!(err, LatheError::Region(RegionError::EmptyBounds { .. })));
    }

    #[test]
    fn broken_curve_is_skipped() {
        let mut ctx = EvalContext::default();
        let err = ComputeRegion::new(0.0, 1.0)
            .execute(&curves(&["y = x", "y = x +"]), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, LatheError::Region(RegionError::TooFewCurves(1))));
        assert_eq!(ctx.diagnostics.records().len(), 1);
    }

    #[test]
    fn unusable_inverse_curve_does_not_stop_the_sweep() {
        let mut ctx = EvalContext::default();
        let input = curves(&["y = x^2", "y = 4", "x = sqrt(-1 - y^2)"]);
        for _ in 0..2 {
            let r = ComputeRegion::new(-2.0, 2.0).execute(&input, &mut ctx).unwrap();
            assert_eq!(r.len(), 201);
            assert!(r.upper_profile.iter().all(|p| (p.y - 4.0).abs() < 1e-12));
            assert!(r.lower_profile.iter().all(|p| (p.y - p.x * p.x).abs() < 1e-12));
        }
        let records = ctx.diagnostics.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tag, "inverse");
        assert_eq!(records[0].subject, "sqrt(-1 - y^2)");
    }

    #[test]
    fn deeply_nested_curve_is_reported_not_fatal() {
        let deep = format!("y = {}x{}", "(".repeat(600), ")".repeat(600));
        let mut ctx = EvalContext::default();
        let r = ComputeRegion::new(-2.0, 2.0)
            .execute(&curves(&["y = x^2", "y = 4", deep.as_str()]), &mut ctx)
            .unwrap();
        assert!(r.upper_profile.iter().all(|p| (p.y - 4.0).abs() < 1e-12));
        assert_eq!(ctx.diagnostics.records().len(), 1);
        assert_eq!(ctx.diagnostics.records()[0].tag, "compile");
    }

    #[test]
    fn nowhere_defined_curves_have_no_region() {
        let err = region(&["y = sqrt(-1 - x^2)", "y = 1"], 0.0, 1.0).unwrap_err();
        assert!(matches!(err, LatheError::Region(RegionError::NoValidRegion)));
    }

    #[test]
    fn partially_defined_curve_leaves_a_gap() {
        let r = ComputeRegion::new(-1.0, 1.0)
            .with_resolution(20)
            .execute(&curves(&["y = sqrt(x)", "y = -1"]), &mut EvalContext::default())
            .unwrap();
        assert_eq!(r.len(), 11);
        assert!(r.upper_profile[0].x.abs() < 1e-12);
        assert!((r.x_min + 1.0).abs() < 1e-12);
    }

    #[test]
    fn x_of_y_curve_through_inverse() {
        // x = y^3 is y = cbrt(x)
        let r = region(&["x = y^3", "y = 0"], 1.0, 8.0).unwrap();
        let last = r.upper_profile.last().unwrap();
        assert!((last.y - 2.0).abs() < 0.05);
        assert!(r.lower_profile.iter().all(|p| p.y.abs() < 1e-12));
    }
}
