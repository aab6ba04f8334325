//! Model parameters shared by every regime solver.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::threshold;

/// The two exogenous inputs of the model: curvature `theta` and retailer count `n`.
///
/// A `ParameterSet` is immutable. Changing a parameter produces a new value via
/// [`with_theta`](ParameterSet::with_theta) or [`with_n`](ParameterSet::with_n),
/// so snapshots computed from the old set are never affected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameterSet")]
pub struct ParameterSet {
    theta: f64,
    n: f64,
}

impl ParameterSet {
    /// Creates a validated parameter set.
    pub fn new(theta: f64, n: f64) -> Result<Self> {
        validate_theta(theta)?;
        validate_retailers(n)?;
        Ok(Self { theta, n })
    }

    /// Curvature/cost parameter.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Number of symmetric retailers.
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Returns a copy with `theta` replaced.
    pub fn with_theta(self, theta: f64) -> Result<Self> {
        Self::new(theta, self.n)
    }

    /// Returns a copy with `n` replaced.
    pub fn with_n(self, n: f64) -> Result<Self> {
        Self::new(self.theta, n)
    }

    /// Retailer count at which both RPM regimes switch branch.
    pub fn n_threshold_all(&self) -> Result<f64> {
        threshold::n_threshold_all(self.theta)
    }

    /// Regime-switch marker used for reporting.
    pub fn n_threshold(&self) -> Result<f64> {
        threshold::n_threshold(self.theta)
    }
}

pub(crate) fn validate_theta(theta: f64) -> Result<()> {
    if !(theta > 0.0 && theta.is_finite()) {
        return Err(DomainError::NonPositiveTheta { theta });
    }
    Ok(())
}

pub(crate) fn validate_retailers(n: f64) -> Result<()> {
    if !(n >= 1.0 && n.is_finite()) {
        return Err(DomainError::TooFewRetailers { n });
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawParameterSet {
    theta: f64,
    n: f64,
}

impl TryFrom<RawParameterSet> for ParameterSet {
    type Error = DomainError;

    fn try_from(raw: RawParameterSet) -> Result<Self> {
        Self::new(raw.theta, raw.n)
    }
}
