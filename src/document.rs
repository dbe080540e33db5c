use slotmap::SlotMap;

use crate::context::EvalContext;
use crate::curve::{Color, Curve, CurveId, Profile, SampleCurve, PALETTE};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::expr::latex;
use crate::operations::{
    AutoDetectBounds, Axis, Bounds, BoundsParams, ComputeRegion, ComputeVolume, ComputedRegion,
    IntegrationParams, RegionParams, RevolutionResult,
};
use crate::tessellation::{MeshParams, RevolutionMesh, RevolveMesh};

/// Parameters used by every computation of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DocumentSettings {
    pub region: RegionParams,
    pub integration: IntegrationParams,
    pub mesh: MeshParams,
    pub bounds: BoundsParams,
}

/// An ordered set of curves together with the state computed from them.
///
/// The document hands out [`CurveId`]s and palette colors, and owns the
/// [`EvalContext`] so compiled expressions and reported diagnostics persist
/// across recomputations.
#[derive(Debug, Default)]
pub struct Document {
    curves: SlotMap<CurveId, Curve>,
    order: Vec<CurveId>,
    next_color: usize,
    pub settings: DocumentSettings,
    ctx: EvalContext,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: DocumentSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Parses and appends a curve. Returns `None` if the equation is not one
    /// of the supported forms; nothing is added in that case.
    pub fn add_curve(&mut self, raw: &str) -> Option<CurveId> {
        let curve = Curve::from_equation(raw)?;
        Some(self.insert(curve))
    }

    /// Like [`Document::add_curve`] for LaTeX-flavored input. The stored raw
    /// equation keeps the LaTeX text.
    pub fn add_latex_curve(&mut self, latex_input: &str) -> Option<CurveId> {
        let mut curve = Curve::from_equation(&latex::normalize(latex_input))?;
        curve.raw_equation = latex_input.to_string();
        Some(self.insert(curve))
    }

    fn insert(&mut self, curve: Curve) -> CurveId {
        let color = PALETTE[self.next_color % PALETTE.len()];
        self.next_color += 1;
        let id = self
            .curves
            .insert_with_key(|id| curve.with_identity(id, color));
        self.order.push(id);
        id
    }

    /// Replaces the equation of an existing curve, keeping its id, color and
    /// position. Returns `false` if the id is unknown or the equation does
    /// not parse; the curve is left untouched then.
    pub fn replace_curve(&mut self, id: CurveId, raw: &str) -> bool {
        let Some(existing) = self.curves.get(id) else {
            return false;
        };
        let Some(curve) = Curve::from_equation(raw) else {
            return false;
        };
        let replacement = curve.with_identity(id, existing.color);
        self.curves[id] = replacement;
        self.prune_cache();
        true
    }

    /// Changes the display color of a curve.
    pub fn set_color(&mut self, id: CurveId, color: Color) -> bool {
        match self.curves.get_mut(id) {
            Some(curve) => {
                curve.color = color;
                true
            }
            None => false,
        }
    }

    pub fn remove_curve(&mut self, id: CurveId) -> Option<Curve> {
        let curve = self.curves.remove(id)?;
        self.order.retain(|&other| other != id);
        self.prune_cache();
        Some(curve)
    }

    /// Drops compiled expressions no current curve uses.
    fn prune_cache(&mut self) {
        let curves = &self.curves;
        self.ctx
            .cache
            .retain(|source| curves.values().any(|curve| curve.expression == source));
    }

    #[must_use]
    pub fn curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.get(id)
    }

    /// Curves in insertion order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.order.iter().filter_map(|&id| self.curves.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.ctx.diagnostics
    }

    pub fn context_mut(&mut self) -> &mut EvalContext {
        &mut self.ctx
    }

    fn snapshot(&self) -> Vec<Curve> {
        self.curves().cloned().collect()
    }

    /// Proposes integration bounds for the current curves.
    pub fn auto_bounds(&mut self) -> Bounds {
        let curves = self.snapshot();
        AutoDetectBounds::new()
            .with_params(self.settings.bounds)
            .execute(&curves, &mut self.ctx)
    }

    /// Computes the region between the current curves over `[x_min, x_max]`.
    ///
    /// # Errors
    ///
    /// See [`ComputeRegion::execute`].
    pub fn region(&mut self, x_min: f64, x_max: f64) -> Result<ComputedRegion> {
        let curves = self.snapshot();
        ComputeRegion::new(x_min, x_max)
            .with_params(self.settings.region)
            .execute(&curves, &mut self.ctx)
    }

    /// Computes the region and the volume of its revolution.
    ///
    /// # Errors
    ///
    /// See [`ComputeRegion::execute`] and [`ComputeVolume::execute`].
    pub fn revolve(
        &mut self,
        x_min: f64,
        x_max: f64,
        axis: Axis,
        axis_value: f64,
    ) -> Result<RevolutionResult> {
        let region = self.region(x_min, x_max)?;
        ComputeVolume::new(axis, axis_value)
            .with_params(self.settings.integration)
            .execute(&region)
    }

    /// Builds the surface mesh for a revolution computed earlier.
    ///
    /// # Errors
    ///
    /// See [`RevolveMesh::execute`].
    pub fn mesh(&self, result: &RevolutionResult) -> Result<RevolutionMesh> {
        RevolveMesh::new(result.formula.axis, result.formula.axis_value)
            .with_params(self.settings.mesh)
            .execute(&result.region)
    }

    /// Samples one curve for drawing. Unknown ids and curves that fail to
    /// compile yield no pieces.
    pub fn sample(
        &mut self,
        id: CurveId,
        x_range: (f64, f64),
        y_range: (f64, f64),
        steps: usize,
    ) -> Vec<Profile> {
        let Some(curve) = self.curves.get(id) else {
            return Vec::new();
        };
        match self.ctx.compile_or_report(curve) {
            Some(compiled) => SampleCurve::new(x_range, y_range, steps).execute(&compiled),
            None => Vec::new(),
        }
    }
}
