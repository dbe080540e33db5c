use super::CurveKind;
use crate::expr::{eval_constant, references_identifier};

/// Result of classifying an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEquation {
    pub kind: CurveKind,
    /// Trimmed right-hand side.
    pub expression: String,
}

/// Classifies `y = <expr>` / `x = <expr>` equations.
///
/// The left-hand side is case-insensitive. A right-hand side counts as
/// constant when it does not reference the free variable and evaluates to a
/// finite number, so `y = 2*pi` is a horizontal line.
///
/// Returns `None` for empty input, any other left-hand side, or an empty
/// right-hand side.
#[must_use]
pub fn parse_equation(raw: &str) -> Option<ParsedEquation> {
    let (lhs, rhs) = raw.trim().split_once('=')?;
    let expression = rhs.trim();
    if expression.is_empty() {
        return None;
    }

    let lhs = lhs.trim();
    let (function_kind, constant_kind) = if lhs.eq_ignore_ascii_case("y") {
        (CurveKind::YOfX, CurveKind::YConst)
    } else if lhs.eq_ignore_ascii_case("x") {
        (CurveKind::XOfY, CurveKind::XConst)
    } else {
        return None;
    };

    let free = function_kind.free_variable();
    let is_constant =
        !references_identifier(expression, free) && eval_constant(expression).is_finite();

    Some(ParsedEquation {
        kind: if is_constant { constant_kind } else { function_kind },
        expression: expression.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kind_of(raw: &str) -> CurveKind {
        parse_equation(raw).unwrap().kind
    }

    #[test]
    fn function_of_x() {
        assert_eq!(
            parse_equation("y = x^2"),
            Some(ParsedEquation {
                kind: CurveKind::YOfX,
                expression: "x^2".into()
            })
        );
    }

    #[test]
    fn horizontal_line() {
        assert_eq!(
            parse_equation("y = 3"),
            Some(ParsedEquation {
                kind: CurveKind::YConst,
                expression: "3".into()
            })
        );
    }

    #[test]
    fn empty_and_malformed_input() {
        assert_eq!(parse_equation(""), None);
        assert_eq!(parse_equation("   "), None);
        assert_eq!(parse_equation("y ="), None);
        assert_eq!(parse_equation("z = 4"), None);
        assert_eq!(parse_equation("x^2 + 1"), None);
    }

    #[test]
    fn constant_detection_is_empirical() {
        assert_eq!(kind_of("y = 2*pi"), CurveKind::YConst);
        assert_eq!(kind_of("y = exp(2)"), CurveKind::YConst);
        assert_eq!(kind_of("x = 4"), CurveKind::XConst);
        assert_eq!(kind_of("x = y^2"), CurveKind::XOfY);
        // `x` in `x = ...` is not the free variable of the right-hand side
        assert_eq!(kind_of("x = 1 + 1"), CurveKind::XConst);
    }

    #[test]
    fn variable_inside_function_name_is_ignored() {
        assert_eq!(kind_of("y = exp(1) + max(1)"), CurveKind::YConst);
        assert_eq!(kind_of("y = exp(x)"), CurveKind::YOfX);
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        let parsed = parse_equation("  Y   =   sin(x)  ").unwrap();
        assert_eq!(parsed.kind, CurveKind::YOfX);
        assert_eq!(parsed.expression, "sin(x)");
        assert_eq!(kind_of("X=5"), CurveKind::XConst);
    }
}
