//! Algebraic expression compiler and evaluator.
//!
//! Expressions come from free-text user input, so nothing here generates
//! code: text is tokenized, parsed into a [`parser::Node`] tree and
//! interpreted. Evaluation never fails loudly; an undefined result is NaN.

mod cache;
mod function;
pub mod latex;
mod lexer;
mod parser;

pub use cache::ExprCache;
pub use function::Function;
pub use lexer::references_identifier;

use std::collections::BTreeSet;

use crate::error::ExprError;
use parser::Node;

/// Longest input accepted by [`eval_constant`].
pub const MAX_CONSTANT_LEN: usize = 200;

/// Longest input accepted by [`compile`].
pub const MAX_SOURCE_LEN: usize = 1000;

/// A parsed expression ready for repeated evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    source: String,
    root: Node,
}

impl CompiledExpr {
    /// The exact source text this expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates with `var` bound to `value`.
    ///
    /// Returns NaN when the result is not finite, a domain error occurs, or
    /// the expression references a variable other than `var`.
    #[must_use]
    pub fn evaluate(&self, var: &str, value: f64) -> f64 {
        finite_or_nan(self.root.eval(&|name| (name == var).then_some(value)))
    }

    /// Evaluates with no variables bound. NaN if any variable is referenced.
    #[must_use]
    pub fn evaluate_constant(&self) -> f64 {
        finite_or_nan(self.root.eval(&|_| None))
    }

    /// Names of the free variables, sorted.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names = BTreeSet::new();
        self.root.collect_variables(&mut names);
        names.into_iter().collect()
    }
}

fn finite_or_nan(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

/// Compiles `source` into an evaluable expression.
///
/// # Errors
///
/// Returns an [`ExprError`] if the text is empty, longer than
/// [`MAX_SOURCE_LEN`] characters, nested too deeply or not a valid
/// expression.
pub fn compile(source: &str) -> Result<CompiledExpr, ExprError> {
    let len = source.chars().count();
    if len > MAX_SOURCE_LEN {
        return Err(ExprError::TooLong {
            len,
            max: MAX_SOURCE_LEN,
        });
    }
    let tokens = lexer::tokenize(source)?;
    let root = parser::parse(&tokens)?;
    Ok(CompiledExpr {
        source: source.to_string(),
        root,
    })
}

/// Evaluates `expr` at `value` of variable `var`. See [`CompiledExpr::evaluate`].
#[must_use]
pub fn evaluate(expr: &CompiledExpr, var: &str, value: f64) -> f64 {
    expr.evaluate(var, value)
}

/// Evaluates a variable-free expression under strict input guards.
///
/// Inputs over [`MAX_CONSTANT_LEN`] characters or containing anything other
/// than ASCII digits, letters, whitespace and `+-*/^().` are rejected.
/// Plain decimal literals skip the parser entirely. Every failure is NaN.
#[must_use]
pub fn eval_constant(source: &str) -> f64 {
    if check_constant_input(source).is_err() {
        return f64::NAN;
    }
    let trimmed = source.trim();
    if is_plain_decimal(trimmed) {
        return trimmed.parse().unwrap_or(f64::NAN);
    }
    match compile(trimmed) {
        Ok(expr) => expr.evaluate_constant(),
        Err(_) => f64::NAN,
    }
}

/// Applies the length ceiling and character whitelist of [`eval_constant`].
///
/// # Errors
///
/// Returns [`ExprError::TooLong`] or [`ExprError::UnexpectedChar`].
pub fn check_constant_input(source: &str) -> Result<(), ExprError> {
    let len = source.chars().count();
    if len > MAX_CONSTANT_LEN {
        return Err(ExprError::TooLong {
            len,
            max: MAX_CONSTANT_LEN,
        });
    }
    let allowed = |c: char| {
        c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || "+-*/^().".contains(c)
    };
    match source.char_indices().find(|&(_, c)| !allowed(c)) {
        Some((offset, c)) => Err(ExprError::UnexpectedChar(c, offset)),
        None => Ok(()),
    }
}

/// `-?\d+(\.\d+)?`
fn is_plain_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn compile_and_evaluate() {
        let expr = compile("x^2 - 1").unwrap();
        assert!((expr.evaluate("x", 3.0) - 8.0).abs() < 1e-12);
        assert!((evaluate(&expr, "x", -1.0)).abs() < 1e-12);
        assert_eq!(expr.source(), "x^2 - 1");
    }

    #[test]
    fn evaluation_failures_are_nan() {
        let expr = compile("sqrt(x)").unwrap();
        assert!(expr.evaluate("x", -1.0).is_nan());
        assert!(compile("1 / x").unwrap().evaluate("x", 0.0).is_nan());
        // wrong variable bound
        assert!(compile("y + 1").unwrap().evaluate("x", 2.0).is_nan());
    }

    #[test]
    fn compile_errors_are_typed() {
        assert_eq!(compile(""), Err(ExprError::Empty));
        assert_eq!(compile("   "), Err(ExprError::Empty));
        assert!(compile("2 +").is_err());
    }

    #[test]
    fn hostile_nesting_fails_to_compile() {
        let nested = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(compile(&nested).is_err());

        let within_length = format!("{}x{}", "(".repeat(400), ")".repeat(400));
        assert!(matches!(compile(&within_length), Err(ExprError::TooDeep { .. })));

        let long_sum = vec!["x"; 600].join("+");
        assert!(matches!(compile(&long_sum), Err(ExprError::TooLong { .. })));
    }

    #[test]
    fn variables_are_reported() {
        assert_eq!(compile("x * exp(x) + pi").unwrap().variables(), vec!["x"]);
        assert!(compile("2 * pi").unwrap().variables().is_empty());
    }

    #[test]
    fn eval_constant_accepts_literals_and_expressions() {
        assert!((eval_constant("3") - 3.0).abs() < 1e-12);
        assert!((eval_constant(" -2.5 ") + 2.5).abs() < 1e-12);
        assert!((eval_constant("2*pi") - 2.0 * PI).abs() < 1e-12);
        assert!((eval_constant("sqrt(16) + 1") - 5.0).abs() < 1e-12);
    }

    #[test]
    fn eval_constant_is_deterministic() {
        let a = eval_constant("exp(1) / 3");
        let b = eval_constant("exp(1) / 3");
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn eval_constant_rejects_hostile_input() {
        let long = "1+".repeat(150) + "1";
        assert!(long.len() > MAX_CONSTANT_LEN);
        assert!(eval_constant(&long).is_nan());
        assert!(eval_constant("1; 2").is_nan());
        assert!(eval_constant("max(1, 2)").is_nan());
        assert!(eval_constant("x + 1").is_nan());
        assert!(eval_constant("1 / 0").is_nan());
        assert!(eval_constant("").is_nan());
    }

    #[test]
    fn plain_decimal_detection() {
        assert!(is_plain_decimal("42"));
        assert!(is_plain_decimal("-0.25"));
        assert!(!is_plain_decimal("1e5"));
        assert!(!is_plain_decimal("inf"));
        assert!(!is_plain_decimal("1."));
        assert!(!is_plain_decimal("-"));
    }
}
