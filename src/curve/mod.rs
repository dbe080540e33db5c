mod compiled;
mod inverse;
mod parse;
mod sample;

pub use compiled::{CompiledCurve, CurveBody, CurveFunction};
pub use inverse::{InverseFunction, InverseParams};
pub use parse::{parse_equation, ParsedEquation};
pub use sample::SampleCurve;

slotmap::new_key_type! {
    /// Identifier of a curve within a [`crate::Document`].
    pub struct CurveId;
}

/// The four supported equation shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// `y = f(x)`
    YOfX,
    /// `x = g(y)`
    XOfY,
    /// `x = c`, a vertical line.
    XConst,
    /// `y = c`, a horizontal line.
    YConst,
}

impl CurveKind {
    /// The variable the right-hand side is written in.
    #[must_use]
    pub fn free_variable(self) -> &'static str {
        match self {
            Self::YOfX | Self::YConst => "x",
            Self::XOfY | Self::XConst => "y",
        }
    }

    /// Returns `true` for the two constant-line kinds.
    #[must_use]
    pub fn is_constant(self) -> bool {
        matches!(self, Self::XConst | Self::YConst)
    }
}

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Builds a color from `0xRRGGBB`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Channels scaled to `[0, 1]`.
    #[must_use]
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        PALETTE[0]
    }
}

/// Colors handed out to new curves, in order.
pub const PALETTE: [Color; 6] = [
    Color::from_hex(0x3b82f6),
    Color::from_hex(0xef4444),
    Color::from_hex(0x10b981),
    Color::from_hex(0xf59e0b),
    Color::from_hex(0x8b5cf6),
    Color::from_hex(0xec4899),
];

/// A user-entered curve. Immutable: edits produce a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub id: CurveId,
    pub kind: CurveKind,
    /// Right-hand side in algebraic form.
    pub expression: String,
    /// The equation as the user typed it.
    pub raw_equation: String,
    pub color: Color,
}

impl Curve {
    /// Parses an equation into a detached curve (null id, default color).
    ///
    /// Returns `None` when the equation is not one of the supported forms.
    #[must_use]
    pub fn from_equation(raw: &str) -> Option<Self> {
        let parsed = parse_equation(raw)?;
        Some(Self {
            id: CurveId::default(),
            kind: parsed.kind,
            expression: parsed.expression,
            raw_equation: raw.to_string(),
            color: Color::default(),
        })
    }

    /// Returns a copy with another id and color.
    #[must_use]
    pub fn with_identity(self, id: CurveId, color: Color) -> Self {
        Self { id, color, ..self }
    }
}

/// One sample of a boundary curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub x: f64,
    pub y: f64,
}

impl ProfilePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An ordered run of boundary samples.
pub type Profile = Vec<ProfilePoint>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_equation_keeps_raw_text() {
        let curve = Curve::from_equation("y = x^2").unwrap();
        assert_eq!(curve.kind, CurveKind::YOfX);
        assert_eq!(curve.expression, "x^2");
        assert_eq!(curve.raw_equation, "y = x^2");
        assert_eq!(curve.id, CurveId::default());
    }

    #[test]
    fn free_variables() {
        assert_eq!(CurveKind::YOfX.free_variable(), "x");
        assert_eq!(CurveKind::XOfY.free_variable(), "y");
        assert!(CurveKind::XConst.is_constant());
        assert!(!CurveKind::XOfY.is_constant());
    }

    #[test]
    fn hex_colors() {
        let c = Color::from_hex(0x10_20_30);
        assert_eq!((c.r, c.g, c.b), (0x10, 0x20, 0x30));
        let unit = Color::from_hex(0xff_00_00).to_unit();
        assert!((unit[0] - 1.0).abs() < f32::EPSILON);
    }
}
