mod bounds;
mod formula;
mod intersect;
mod region;
mod volume;

pub use bounds::{AutoDetectBounds, Bounds, BoundsParams, FALLBACK_BOUNDS};
pub use formula::{FormulaDescriptor, FormulaTerm};
pub use intersect::{dedup_by_proximity, FindIntersections, TOUCH_EPSILON};
pub use region::{
    BoundaryCurve, BoundaryPair, BoundarySpan, BoundaryTracker, Candidate, ComputeRegion,
    ComputedRegion, RegionParams,
};
pub use volume::{
    shell_area, washer_area, Axis, ComputeVolume, IntegrationParams, Method, RevolutionResult,
};
