use crate::curve::{CompiledCurve, Curve};
use crate::diagnostics::Diagnostics;
use crate::error::ExprError;
use crate::expr::ExprCache;

/// Mutable state shared by the computations of one document.
///
/// Holds the compiled-expression cache and the deduplicated diagnostics
/// channel. Nothing here is process-wide: two documents never share a
/// context.
#[derive(Debug, Default)]
pub struct EvalContext {
    pub cache: ExprCache,
    pub diagnostics: Diagnostics,
}

impl EvalContext {
    /// Creates a context with an empty cache and the given diagnostics channel.
    #[must_use]
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            cache: ExprCache::new(),
            diagnostics,
        }
    }

    /// Compiles a curve through the cache.
    ///
    /// # Errors
    ///
    /// Returns the compile error; see [`EvalContext::compile_or_report`] for
    /// the skipping variant used by batch operations.
    pub fn compile(&mut self, curve: &Curve) -> Result<CompiledCurve, ExprError> {
        CompiledCurve::compile_cached(curve, &mut self.cache)
    }

    /// Compiles a curve, reporting failures under the `"compile"` tag
    /// instead of returning them.
    pub fn compile_or_report(&mut self, curve: &Curve) -> Option<CompiledCurve> {
        match self.compile(curve) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                self.diagnostics.warn("compile", &curve.expression, &err);
                None
            }
        }
    }

    /// Compiles every curve, skipping the ones that fail.
    pub fn compile_all(&mut self, curves: &[Curve]) -> Vec<CompiledCurve> {
        curves
            .iter()
            .filter_map(|curve| self.compile_or_report(curve))
            .collect()
    }
}
