use std::f64::consts::PI;
use std::fmt;

use tracing::debug;

use super::formula::FormulaDescriptor;
use super::region::ComputedRegion;
use crate::error::{RegionError, Result};
use crate::math::{simpson, ProfileInterpolator};

/// Rotation axis orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A horizontal line `y = value`, parallel to the x-axis.
    X,
    /// A vertical line `x = value`, parallel to the y-axis.
    Y,
}

impl Axis {
    /// Integration method used for this axis.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::X => Method::Disk,
            Self::Y => Method::Shell,
        }
    }

    /// The variable fixed by the axis line (`y` for [`Axis::X`]).
    #[must_use]
    pub fn line_variable(self) -> &'static str {
        match self {
            Self::X => "y",
            Self::Y => "x",
        }
    }
}

/// Volume integration method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Disks/washers perpendicular to the axis.
    Disk,
    /// Cylindrical shells parallel to the axis.
    Shell,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disk => "disk",
            Self::Shell => "shell",
        })
    }
}

/// Parameters for [`ComputeVolume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationParams {
    /// Lower bound on Simpson intervals; the profile length doubled is used
    /// when larger.
    pub min_intervals: usize,
}

impl Default for IntegrationParams {
    fn default() -> Self {
        Self { min_intervals: 500 }
    }
}

/// Volume of a revolved region together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct RevolutionResult {
    pub volume: f64,
    pub method: Method,
    pub formula: FormulaDescriptor,
    pub region: ComputedRegion,
}

/// Washer cross-section area at one x for rotation about `y = axis_value`.
///
/// When the axis lies strictly between the curves the section is a solid
/// disk of the farther radius.
#[must_use]
pub fn washer_area(upper: f64, lower: f64, axis_value: f64) -> f64 {
    let du = upper - axis_value;
    let dl = lower - axis_value;
    let outer = du.abs().max(dl.abs());
    let inner = if du * dl < 0.0 { 0.0 } else { du.abs().min(dl.abs()) };
    PI * (outer * outer - inner * inner)
}

/// Shell lateral area at one x for rotation about `x = axis_value`.
#[must_use]
pub fn shell_area(x: f64, upper: f64, lower: f64, axis_value: f64) -> f64 {
    2.0 * PI * (x - axis_value).abs() * (upper - lower).abs()
}

/// Computes the volume of revolution of a region.
///
/// Profiles are read through a [`ProfileInterpolator`] and integrated with
/// Simpson's rule over `max(2 * len, min_intervals)` intervals spanning the
/// sampled x-range.
pub struct ComputeVolume {
    axis: Axis,
    axis_value: f64,
    params: IntegrationParams,
}

impl ComputeVolume {
    /// Creates a new `ComputeVolume` operation.
    #[must_use]
    pub fn new(axis: Axis, axis_value: f64) -> Self {
        Self {
            axis,
            axis_value,
            params: IntegrationParams::default(),
        }
    }

    /// Sets custom integration parameters.
    #[must_use]
    pub fn with_params(mut self, params: IntegrationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the integration.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidAxis`] for a non-finite axis offset and
    /// [`RegionError::NoValidRegion`] for a region with fewer than two samples.
    pub fn execute(&self, region: &ComputedRegion) -> Result<RevolutionResult> {
        if !self.axis_value.is_finite() {
            return Err(RegionError::InvalidAxis(self.axis_value).into());
        }
        let (a, b) = match region.sampled_range() {
            Some(range) if region.len() >= 2 => range,
            _ => return Err(RegionError::NoValidRegion.into()),
        };

        let upper = ProfileInterpolator::new(&region.upper_profile);
        let lower = ProfileInterpolator::new(&region.lower_profile);
        let intervals = (2 * region.len()).max(self.params.min_intervals);
        let k = self.axis_value;

        let volume = match self.axis {
            Axis::X => simpson(|x| washer_area(upper.at(x), lower.at(x), k), a, b, intervals),
            Axis::Y => simpson(|x| shell_area(x, upper.at(x), lower.at(x), k), a, b, intervals),
        };
        let method = self.axis.method();
        debug!(%method, axis_value = k, volume, intervals, "integrated volume");

        Ok(RevolutionResult {
            volume,
            method,
            formula: FormulaDescriptor::new(region, self.axis, k),
            region: region.clone(),
        })
    }
}
