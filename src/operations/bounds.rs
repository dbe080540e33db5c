use tracing::debug;

use super::intersect::{dedup_by_proximity, FindIntersections};
use crate::context::EvalContext;
use crate::curve::{Curve, CurveKind, InverseParams};

/// An x-interval proposed for integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
}

/// Returned when the curves do not pin down at least two x-values.
pub const FALLBACK_BOUNDS: Bounds = Bounds {
    x_min: -5.0,
    x_max: 5.0,
};

/// Parameters for [`AutoDetectBounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsParams {
    pub search_min: f64,
    pub search_max: f64,
    /// Scan intervals for each pairwise intersection search.
    pub steps: usize,
    /// Values closer than this are treated as one.
    pub merge_epsilon: f64,
    pub inverse: InverseParams,
}

impl Default for BoundsParams {
    fn default() -> Self {
        Self {
            search_min: -20.0,
            search_max: 20.0,
            steps: 2000,
            merge_epsilon: 1e-6,
            inverse: InverseParams::default(),
        }
    }
}

/// Proposes integration bounds from vertical lines and pairwise
/// intersections of the other curves.
///
/// This is a convenience, not a guarantee: the result spans the outermost
/// interesting x-values found, or [`FALLBACK_BOUNDS`] when fewer than two
/// distinct values exist.
pub struct AutoDetectBounds {
    params: BoundsParams,
}

impl Default for AutoDetectBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoDetectBounds {
    /// Creates a new `AutoDetectBounds` query with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: BoundsParams::default(),
        }
    }

    /// Sets all parameters.
    #[must_use]
    pub fn with_params(mut self, params: BoundsParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the scanned x-range.
    #[must_use]
    pub fn with_search_range(mut self, search_min: f64, search_max: f64) -> Self {
        self.params.search_min = search_min;
        self.params.search_max = search_max;
        self
    }

    /// Sets the scan resolution.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.params.steps = steps;
        self
    }

    /// Executes the detection. Never fails; broken curves are skipped and
    /// reported through `ctx.diagnostics`.
    #[must_use]
    pub fn execute(&self, curves: &[Curve], ctx: &mut EvalContext) -> Bounds {
        let compiled = ctx.compile_all(curves);

        let mut values: Vec<f64> = compiled
            .iter()
            .filter(|c| c.kind() == CurveKind::XConst)
            .filter_map(|c| c.constant())
            .collect();

        let functions: Vec<_> = compiled
            .iter()
            .filter_map(|c| c.to_y_of_x(&self.params.inverse, &mut ctx.diagnostics))
            .collect();

        let finder = FindIntersections::new(self.params.search_min, self.params.search_max)
            .with_steps(self.params.steps);
        for (i, f1) in functions.iter().enumerate() {
            for f2 in &functions[i + 1..] {
                values.extend(finder.execute(|x| f1.y_at(x), |x| f2.y_at(x)));
            }
        }

        let distinct = dedup_by_proximity(values, self.params.merge_epsilon);
        let bounds = match (distinct.first(), distinct.last()) {
            (Some(&x_min), Some(&x_max)) if distinct.len() >= 2 => Bounds { x_min, x_max },
            _ => FALLBACK_BOUNDS,
        };
        debug!(
            candidates = distinct.len(),
            x_min = bounds.x_min,
            x_max = bounds.x_max,
            "detected bounds"
        );
        bounds
    }
}
