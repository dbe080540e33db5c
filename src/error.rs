use thiserror::Error;

/// Top-level error type for the lathe engine.
#[derive(Debug, Error)]
pub enum LatheError {
    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error(transparent)]
    Inverse(#[from] InverseError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Errors raised while compiling an algebraic expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("expression has {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),

    #[error("malformed number {0:?}")]
    BadNumber(String),

    #[error("unexpected token {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression nests deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("unknown function {0:?}")]
    UnknownFunction(String),

    #[error("function {name} takes {expected} argument(s), got {found}")]
    Arity {
        name: &'static str,
        expected: &'static str,
        found: usize,
    },
}

/// Errors raised while building a numeric inverse for an `x = g(y)` curve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InverseError {
    #[error("curve {expression:?} has no finite samples for y in [{y_min}, {y_max}]")]
    NoFiniteSamples {
        expression: String,
        y_min: f64,
        y_max: f64,
    },

    #[error("curve {0:?} is not of the form x = g(y)")]
    NotInvertible(String),
}

/// Errors raised while computing the region between curves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    #[error("a region needs at least 2 usable curves, got {0}")]
    TooFewCurves(usize),

    #[error("empty integration bounds [{x_min}, {x_max}]")]
    EmptyBounds { x_min: f64, x_max: f64 },

    #[error("no valid region between the curves in the given bounds")]
    NoValidRegion,

    #[error("rotation axis offset must be finite, got {0}")]
    InvalidAxis(f64),
}

/// Errors related to revolution mesh generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("invalid mesh parameters: {0}")]
    InvalidParameters(String),

    #[error("profile has {0} points, at least 2 are required")]
    ProfileTooShort(usize),
}

/// Convenience type alias for results using [`LatheError`].
pub type Result<T> = std::result::Result<T, LatheError>;
