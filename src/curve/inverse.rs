use super::{CompiledCurve, CurveKind};
use crate::diagnostics::Diagnostics;
use crate::error::InverseError;
use crate::math::lerp_step;

/// Sampling window for [`InverseFunction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseParams {
    pub y_min: f64,
    pub y_max: f64,
    pub samples: usize,
}

impl Default for InverseParams {
    fn default() -> Self {
        Self {
            y_min: -50.0,
            y_max: 50.0,
            samples: 1000,
        }
    }
}

impl InverseParams {
    /// Sets the sampled y-window.
    #[must_use]
    pub fn with_window(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    /// Sets the number of samples.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }
}

/// Numeric `y(x)` lookup for a curve given as `x = g(y)`.
///
/// Built from `(g(y), y)` samples sorted by x. Queries clamp to the sampled
/// x-range and linearly interpolate inside it. An instance with no samples
/// is undefined (NaN) everywhere.
#[derive(Debug, Clone, Default)]
pub struct InverseFunction {
    /// `(x, y)` pairs sorted by x.
    samples: Vec<(f64, f64)>,
}

impl InverseFunction {
    /// Samples the curve and builds the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`InverseError::NotInvertible`] for curves not of the form
    /// `x = g(y)` and [`InverseError::NoFiniteSamples`] when `g` is undefined
    /// across the whole window.
    pub fn new(curve: &CompiledCurve, params: &InverseParams) -> Result<Self, InverseError> {
        let expression = &curve.curve().expression;
        if curve.kind() != CurveKind::XOfY {
            return Err(InverseError::NotInvertible(expression.clone()));
        }

        let steps = params.samples.saturating_sub(1).max(1);
        let mut samples: Vec<(f64, f64)> = (0..=steps)
            .map(|i| {
                let y = lerp_step(params.y_min, params.y_max, i, steps);
                (curve.eval(y), y)
            })
            .filter(|(x, _)| x.is_finite())
            .collect();

        if samples.is_empty() {
            return Err(InverseError::NoFiniteSamples {
                expression: expression.clone(),
                y_min: params.y_min,
                y_max: params.y_max,
            });
        }

        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { samples })
    }

    /// Best-effort variant of [`InverseFunction::new`].
    ///
    /// On failure, reports a warning tagged `"inverse"` for the curve's
    /// expression (once per expression) and returns an undefined function.
    #[must_use]
    pub fn try_new(
        curve: &CompiledCurve,
        params: &InverseParams,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        match Self::new(curve, params) {
            Ok(inverse) => inverse,
            Err(err) => {
                diagnostics.warn("inverse", &curve.curve().expression, &err);
                Self::default()
            }
        }
    }

    /// Returns `true` if no finite samples exist.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sampled x-range, if any.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((self.samples.first()?.0, self.samples.last()?.0))
    }

    /// `y` at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let (Some(&first), Some(&last)) = (self.samples.first(), self.samples.last()) else {
            return f64::NAN;
        };
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }

        let hi = self.samples.partition_point(|s| s.0 < x);
        let (x1, y1) = self.samples[hi];
        let (x0, y0) = self.samples[hi - 1];
        let span = x1 - x0;
        if span <= 0.0 {
            return y1;
        }
        y0 + (y1 - y0) * (x - x0) / span
    }
}
