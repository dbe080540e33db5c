use crate::error::ExprError;

/// Named constants understood by the evaluator.
#[must_use]
pub fn lookup_constant(name: &str) -> Option<f64> {
    use std::f64::consts;
    match name {
        "pi" | "PI" => Some(consts::PI),
        "e" | "E" => Some(consts::E),
        "tau" => Some(consts::TAU),
        "phi" => Some(1.618_033_988_749_895),
        _ => None,
    }
}

/// Built-in real-valued functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Ln,
    Log,
    Log10,
    Log2,
    Floor,
    Ceil,
    Round,
    Sign,
    Min,
    Max,
    Pow,
    NthRoot,
}

impl Function {
    /// Resolves a function name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let f = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sec" => Self::Sec,
            "csc" => Self::Csc,
            "cot" => Self::Cot,
            "asin" | "arcsin" => Self::Asin,
            "acos" | "arccos" => Self::Acos,
            "atan" | "arctan" => Self::Atan,
            "atan2" => Self::Atan2,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log" => Self::Log,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "sign" => Self::Sign,
            "min" => Self::Min,
            "max" => Self::Max,
            "pow" => Self::Pow,
            "nthRoot" | "nthroot" => Self::NthRoot,
            _ => return None,
        };
        Some(f)
    }

    /// Canonical name, used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Cot => "cot",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Atan2 => "atan2",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "abs",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pow => "pow",
            Self::NthRoot => "nthRoot",
        }
    }

    /// Checks the argument count at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Arity`] if `count` is not accepted.
    pub fn check_arity(self, count: usize) -> Result<(), ExprError> {
        let (ok, expected) = match self {
            Self::Atan2 | Self::Pow => (count == 2, "2"),
            Self::Log | Self::NthRoot => ((1..=2).contains(&count), "1 or 2"),
            Self::Min | Self::Max => (count >= 1, "at least 1"),
            _ => (count == 1, "1"),
        };
        if ok {
            Ok(())
        } else {
            Err(ExprError::Arity {
                name: self.name(),
                expected,
                found: count,
            })
        }
    }

    /// Applies the function. Domain errors yield NaN.
    #[must_use]
    pub fn apply(self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied();
        match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Sec => a.cos().recip(),
            Self::Csc => a.sin().recip(),
            Self::Cot => a.tan().recip(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Atan2 => a.atan2(b.unwrap_or(f64::NAN)),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Sqrt => a.sqrt(),
            Self::Cbrt => a.cbrt(),
            Self::Abs => a.abs(),
            Self::Exp => a.exp(),
            Self::Ln => a.ln(),
            Self::Log => match b {
                Some(base) => a.ln() / base.ln(),
                None => a.ln(),
            },
            Self::Log10 => a.log10(),
            Self::Log2 => a.log2(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Round => a.round(),
            Self::Sign => {
                if a.is_nan() || a == 0.0 {
                    a
                } else {
                    a.signum()
                }
            }
            Self::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Pow => power(a, b.unwrap_or(f64::NAN)),
            Self::NthRoot => nth_root(a, b.unwrap_or(2.0)),
        }
    }
}

/// Real power: negative bases with fractional exponents are undefined.
#[must_use]
pub fn power(base: f64, exponent: f64) -> f64 {
    if base < 0.0 && exponent.fract() != 0.0 {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Real `n`-th root; odd integer degrees accept negative radicands.
#[must_use]
pub fn nth_root(value: f64, degree: f64) -> f64 {
    if degree == 0.0 {
        return f64::NAN;
    }
    if value < 0.0 {
        let is_odd_integer = degree.fract() == 0.0 && degree.rem_euclid(2.0) == 1.0;
        if is_odd_integer {
            return -(-value).powf(degree.recip());
        }
        return f64::NAN;
    }
    value.powf(degree.recip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_is_checked() {
        assert!(Function::Sin.check_arity(1).is_ok());
        assert!(Function::Sin.check_arity(2).is_err());
        assert!(Function::Log.check_arity(2).is_ok());
        assert!(Function::Max.check_arity(4).is_ok());
        assert!(Function::Max.check_arity(0).is_err());
    }

    #[test]
    fn min_max_fold_all_arguments() {
        assert!((Function::Max.apply(&[1.0, 7.0, 3.0]) - 7.0).abs() < 1e-12);
        assert!((Function::Min.apply(&[1.0, -7.0, 3.0]) + 7.0).abs() < 1e-12);
    }

    #[test]
    fn odd_roots_of_negative_numbers_are_real() {
        assert!((nth_root(-8.0, 3.0) + 2.0).abs() < 1e-12);
        assert!(nth_root(-8.0, 2.0).is_nan());
    }

    #[test]
    fn fractional_power_of_negative_base_is_undefined() {
        assert!(power(-2.0, 0.5).is_nan());
        assert!((power(-2.0, 3.0) + 8.0).abs() < 1e-12);
    }

    #[test]
    fn log_with_base() {
        assert!((Function::Log.apply(&[8.0, 2.0]) - 3.0).abs() < 1e-12);
    }
}
