use std::sync::Arc;

use super::{Curve, CurveKind, InverseFunction, InverseParams};
use crate::diagnostics::Diagnostics;
use crate::error::ExprError;
use crate::expr::{compile, CompiledExpr, ExprCache};

/// How a compiled curve is evaluated.
#[derive(Debug, Clone)]
pub enum CurveBody {
    /// Right-hand side depends on the free variable.
    Function(Arc<CompiledExpr>),
    /// Constant-line value; NaN if the expression had no finite value.
    Constant(f64),
}

/// A curve paired with its compiled right-hand side.
#[derive(Debug, Clone)]
pub struct CompiledCurve {
    curve: Curve,
    body: CurveBody,
}

impl CompiledCurve {
    /// Compiles the curve's expression.
    ///
    /// # Errors
    ///
    /// Returns an [`ExprError`] if the expression does not compile.
    pub fn compile(curve: &Curve) -> Result<Self, ExprError> {
        let expr = Arc::new(compile(&curve.expression)?);
        Ok(Self::from_expr(curve, expr))
    }

    /// Like [`CompiledCurve::compile`], reusing compiled expressions from `cache`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExprError`] if the expression does not compile.
    pub fn compile_cached(curve: &Curve, cache: &mut ExprCache) -> Result<Self, ExprError> {
        let expr = cache.get_or_compile(&curve.expression)?;
        Ok(Self::from_expr(curve, expr))
    }

    fn from_expr(curve: &Curve, expr: Arc<CompiledExpr>) -> Self {
        let body = if curve.kind.is_constant() {
            CurveBody::Constant(expr.evaluate_constant())
        } else {
            CurveBody::Function(expr)
        };
        Self {
            curve: curve.clone(),
            body,
        }
    }

    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    #[must_use]
    pub fn kind(&self) -> CurveKind {
        self.curve.kind
    }

    #[must_use]
    pub fn body(&self) -> &CurveBody {
        &self.body
    }

    /// The constant value of an `x = c` / `y = c` curve.
    #[must_use]
    pub fn constant(&self) -> Option<f64> {
        match self.body {
            CurveBody::Constant(c) => Some(c),
            CurveBody::Function(_) => None,
        }
    }

    /// Evaluates the right-hand side at `t` of its own free variable
    /// (x for `y = f(x)`, y for `x = g(y)`). NaN where undefined.
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        match &self.body {
            CurveBody::Function(expr) => expr.evaluate(self.curve.kind.free_variable(), t),
            CurveBody::Constant(c) => *c,
        }
    }

    /// Views the curve as a function `y(x)`.
    ///
    /// `x = g(y)` curves go through the best-effort inverse, reporting
    /// failures to `diagnostics`. Vertical lines have no such view and
    /// return `None`.
    #[must_use]
    pub fn to_y_of_x(
        &self,
        params: &InverseParams,
        diagnostics: &mut Diagnostics,
    ) -> Option<CurveFunction> {
        match (&self.body, self.curve.kind) {
            (_, CurveKind::XConst) => None,
            (CurveBody::Constant(c), _) => Some(CurveFunction::Constant(*c)),
            (CurveBody::Function(expr), CurveKind::YOfX) => {
                Some(CurveFunction::Explicit(Arc::clone(expr)))
            }
            (CurveBody::Function(_), _) => Some(CurveFunction::Inverse(InverseFunction::try_new(
                self,
                params,
                diagnostics,
            ))),
        }
    }
}

/// A curve evaluated as `y(x)`.
#[derive(Debug, Clone)]
pub enum CurveFunction {
    Explicit(Arc<CompiledExpr>),
    Constant(f64),
    Inverse(InverseFunction),
}

impl CurveFunction {
    /// `y` at `x`, NaN where undefined.
    #[must_use]
    pub fn y_at(&self, x: f64) -> f64 {
        match self {
            Self::Explicit(expr) => expr.evaluate("x", x),
            Self::Constant(c) => *c,
            Self::Inverse(inverse) => inverse.eval(x),
        }
    }
}
