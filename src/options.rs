//! Configuration for retailer-count sweeps.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::regime::Regime;

/// Largest number of grid points [`SweepOptions::grid`] will allocate.
pub const MAX_GRID_POINTS: usize = 100_000_000;

/// Controls the `n` grid and the regimes solved by [`sweep`](crate::sweep::sweep).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepOptions {
    /// First retailer count on the grid (inclusive).
    pub n_start: f64,
    /// Upper end of the grid (exclusive).
    pub n_end: f64,
    /// Spacing between grid points.
    pub step: f64,
    /// Regimes to solve at every grid point, in reporting order.
    pub regimes: Vec<Regime>,
    /// Whether grid points are solved on the rayon thread pool.
    pub parallel: bool,
    /// Absolute tolerance used when deciding that two regime curves coincide.
    pub coincidence_tolerance: f64,
    /// Relative tolerance, scaled by the magnitude of the second curve.
    pub coincidence_relative_tolerance: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            n_start: 1.0,
            n_end: 21.0,
            step: 0.01,
            regimes: Regime::ALL.to_vec(),
            parallel: true,
            coincidence_tolerance: 1e-8,
            coincidence_relative_tolerance: 1e-5,
        }
    }
}

impl SweepOptions {
    /// Override the grid bounds while preserving other defaults.
    pub fn with_range(mut self, n_start: f64, n_end: f64) -> Self {
        self.n_start = n_start;
        self.n_end = n_end;
        self
    }

    /// Override the grid spacing.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Restrict the sweep to the given regimes.
    pub fn with_regimes(mut self, regimes: impl Into<Vec<Regime>>) -> Self {
        self.regimes = regimes.into();
        self
    }

    /// Enable or disable parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the tolerance used for coincidence detection.
    pub fn with_coincidence_tolerance(mut self, tolerance: f64) -> Self {
        self.coincidence_tolerance = tolerance;
        self
    }

    /// Set the relative tolerance used for coincidence detection.
    pub fn with_coincidence_relative_tolerance(mut self, tolerance: f64) -> Self {
        self.coincidence_relative_tolerance = tolerance;
        self
    }

    /// Builds the half-open grid `n_start, n_start + step, ...` below `n_end`.
    ///
    /// Grids with more than [`MAX_GRID_POINTS`] points are rejected.
    pub fn grid(&self) -> Result<DVector<f64>> {
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(DomainError::invalid_grid("step must be positive and finite"));
        }
        if !(self.n_start >= 1.0 && self.n_start.is_finite()) {
            return Err(DomainError::invalid_grid("grid must start at n >= 1"));
        }
        if !(self.n_end > self.n_start && self.n_end.is_finite()) {
            return Err(DomainError::invalid_grid("grid end must exceed its start"));
        }
        if self.regimes.is_empty() {
            return Err(DomainError::invalid_grid("at least one regime is required"));
        }

        let count = ((self.n_end - self.n_start) / self.step).ceil();
        if !(count.is_finite() && count <= MAX_GRID_POINTS as f64) {
            return Err(DomainError::invalid_grid("grid has too many points"));
        }
        let count = count as usize;
        Ok(DVector::from_iterator(
            count,
            (0..count).map(|i| self.n_start + i as f64 * self.step),
        ))
    }
}
