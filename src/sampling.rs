//! Reproducible random scenarios for robustness checks across the parameter space.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use rayon::prelude::*;

use crate::error::{DomainError, Result};
use crate::parameters::{validate_retailers, validate_theta, ParameterSet};
use crate::regime::Regime;
use crate::state::Equilibrium;

/// A batch of `(theta, n)` scenarios.
#[derive(Clone, Debug)]
pub struct ScenarioDraws {
    scenarios: Vec<ParameterSet>,
}

impl ScenarioDraws {
    /// Wraps an explicit list of scenarios.
    pub fn new(scenarios: Vec<ParameterSet>) -> Result<Self> {
        if scenarios.is_empty() {
            return Err(DomainError::invalid_grid("at least one scenario is required"));
        }
        Ok(Self { scenarios })
    }

    /// Draws `count` scenarios uniformly from `theta_range x n_range` (half-open ranges).
    pub fn uniform(
        count: usize,
        theta_range: (f64, f64),
        n_range: (f64, f64),
        seed: u64,
    ) -> Result<Self> {
        let (theta_low, theta_high) = theta_range;
        let (n_low, n_high) = n_range;
        validate_theta(theta_low)?;
        validate_retailers(n_low)?;
        if !(theta_high > theta_low && theta_high.is_finite()) {
            return Err(DomainError::invalid_grid("theta range must be non-empty"));
        }
        if !(n_high > n_low && n_high.is_finite()) {
            return Err(DomainError::invalid_grid("n range must be non-empty"));
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let theta_dist = Uniform::new(theta_low, theta_high);
        let n_dist = Uniform::new(n_low, n_high);
        let scenarios = (0..count)
            .map(|_| {
                let theta = theta_dist.sample(&mut rng);
                let n = n_dist.sample(&mut rng);
                ParameterSet::new(theta, n)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(scenarios)
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns `true` when the batch holds no scenarios.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Scenarios in draw order.
    pub fn scenarios(&self) -> &[ParameterSet] {
        &self.scenarios
    }

    /// Solves `regime` at every scenario in parallel, preserving order.
    pub fn solve(&self, regime: Regime) -> Result<Vec<Equilibrium>> {
        self.scenarios
            .par_iter()
            .map(|params| regime.solve(params))
            .collect()
    }
}
