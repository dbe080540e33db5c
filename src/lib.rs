pub mod context;
pub mod curve;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod expr;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use context::EvalContext;
pub use curve::{Color, Curve, CurveId, CurveKind};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use document::{Document, DocumentSettings};
pub use error::{LatheError, Result};
pub use operations::{Axis, Method};
