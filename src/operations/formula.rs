//! Human-readable description of a volume integral.
//!
//! The descriptor is display data for the caller; it is never evaluated.

use std::fmt;

use super::region::{BoundarySpan, ComputedRegion};
use super::volume::{Axis, Method};
use crate::math::ProfileInterpolator;

/// One integral of the sum, covering a single boundary span.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaTerm {
    pub x_start: f64,
    pub x_end: f64,
    /// Integrand without the leading `π` / `2π` factor.
    pub integrand: String,
}

/// What was integrated and how.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaDescriptor {
    pub method: Method,
    pub axis: Axis,
    pub axis_value: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub terms: Vec<FormulaTerm>,
}

impl FormulaDescriptor {
    /// Describes the revolution of `region` about `axis` at `axis_value`.
    #[must_use]
    pub fn new(region: &ComputedRegion, axis: Axis, axis_value: f64) -> Self {
        let (x_start, x_end) = region.sampled_range().unwrap_or((region.x_min, region.x_max));
        let method = axis.method();
        let upper = ProfileInterpolator::new(&region.upper_profile);
        let lower = ProfileInterpolator::new(&region.lower_profile);

        let terms = region
            .spans
            .iter()
            .filter(|span| span.x_end > span.x_start)
            .map(|span| {
                let mid = 0.5 * (span.x_start + span.x_end);
                FormulaTerm {
                    x_start: span.x_start,
                    x_end: span.x_end,
                    integrand: integrand(span, method, axis_value, upper.at(mid), lower.at(mid)),
                }
            })
            .collect();

        Self {
            method,
            axis,
            axis_value,
            x_start,
            x_end,
            terms,
        }
    }

    /// Leading constant of every term.
    #[must_use]
    pub fn factor(&self) -> &'static str {
        match self.method {
            Method::Disk => "π",
            Method::Shell => "2π",
        }
    }

    /// The formula as LaTeX source.
    #[must_use]
    pub fn to_latex(&self) -> String {
        let factor = match self.method {
            Method::Disk => r"\pi",
            Method::Shell => r"2\pi",
        };
        let body = if self.terms.is_empty() {
            format!(
                r"{factor}\int_{{{}}}^{{{}}} {}\,dx",
                fmt_num(self.x_start),
                fmt_num(self.x_end),
                self.generic_integrand()
            )
        } else {
            self.terms
                .iter()
                .map(|t| {
                    format!(
                        r"{factor}\int_{{{}}}^{{{}}} \left[{}\right]\,dx",
                        fmt_num(t.x_start),
                        fmt_num(t.x_end),
                        t.integrand.replace('*', r"\cdot ")
                    )
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("V = {body}")
    }

    fn generic_integrand(&self) -> String {
        let k = fmt_num(self.axis_value);
        match self.method {
            Method::Disk => "(R(x)^2 - r(x)^2)".to_string(),
            Method::Shell => format!("|x - {k}| (f(x) - g(x))"),
        }
    }
}

impl fmt::Display for FormulaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} method about {} = {}: V = ",
            self.method,
            self.axis.line_variable(),
            fmt_num(self.axis_value)
        )?;
        if self.terms.is_empty() {
            return write!(
                f,
                "{}∫[{}, {}] {} dx",
                self.factor(),
                fmt_num(self.x_start),
                fmt_num(self.x_end),
                self.generic_integrand()
            );
        }
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(
                f,
                "{}∫[{}, {}] {} dx",
                self.factor(),
                fmt_num(t.x_start),
                fmt_num(t.x_end),
                t.integrand
            )?;
        }
        Ok(())
    }
}

fn integrand(span: &BoundarySpan, method: Method, k: f64, upper_y: f64, lower_y: f64) -> String {
    let f = &span.upper.expression;
    let g = &span.lower.expression;
    match method {
        Method::Disk => {
            let du = (upper_y - k).abs();
            let dl = (lower_y - k).abs();
            let (outer, inner) = if du >= dl { (f, g) } else { (g, f) };
            if (upper_y - k) * (lower_y - k) < 0.0 {
                format!("{}^2", shifted(outer, k))
            } else {
                format!("{}^2 - {}^2", shifted(outer, k), shifted(inner, k))
            }
        }
        Method::Shell => format!("|{}| * ({f} - {g})", shifted_plain("x", k)),
    }
}

/// `(expr - k)`, or `(expr)` when `k` is zero.
fn shifted(expr: &str, k: f64) -> String {
    format!("({})", shifted_plain(expr, k))
}

fn shifted_plain(expr: &str, k: f64) -> String {
    if k == 0.0 {
        expr.to_string()
    } else if k < 0.0 {
        format!("{expr} + {}", fmt_num(-k))
    } else {
        format!("{expr} - {}", fmt_num(k))
    }
}

/// Formats with at most four decimals and no trailing zeros.
fn fmt_num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
