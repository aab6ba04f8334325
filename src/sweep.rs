//! Dense sweeps over the retailer count for a fixed `theta`.
//!
//! A sweep produces the numeric series a plotting front end needs: one column
//! per regime and key, the regime-switch marker, and which regime curves
//! coincide (so a legend can say "overlaps with").

use log::debug;
use nalgebra::DVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::options::SweepOptions;
use crate::parameters::{validate_theta, ParameterSet};
use crate::regime::Regime;
use crate::state::{EndogenousKey, Equilibrium, SurplusKey};
use crate::threshold::n_threshold;

/// Quantity extracted from each point of a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKey {
    Endogenous(EndogenousKey),
    Surplus(SurplusKey),
    /// Wholesaler plus retailer surplus.
    SupplySurplus,
}

impl SeriesKey {
    fn extract(self, equilibrium: &Equilibrium) -> f64 {
        match self {
            SeriesKey::Endogenous(key) => equilibrium.endogenous.get(key),
            SeriesKey::Surplus(key) => equilibrium.surplus.get(key),
            SeriesKey::SupplySurplus => equilibrium.surplus.supply(),
        }
    }
}

impl From<EndogenousKey> for SeriesKey {
    fn from(key: EndogenousKey) -> Self {
        SeriesKey::Endogenous(key)
    }
}

impl From<SurplusKey> for SeriesKey {
    fn from(key: SurplusKey) -> Self {
        SeriesKey::Surplus(key)
    }
}

/// Solved equilibria of one regime along the grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegimeSeries {
    regime: Regime,
    points: Vec<Equilibrium>,
}

impl RegimeSeries {
    /// Regime these snapshots were solved under.
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Snapshots in grid order.
    pub fn points(&self) -> &[Equilibrium] {
        &self.points
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Extracts one column of values along the grid.
    pub fn column(&self, key: impl Into<SeriesKey>) -> DVector<f64> {
        let key = key.into();
        DVector::from_iterator(
            self.points.len(),
            self.points.iter().map(|eq| key.extract(eq)),
        )
    }
}

/// Output of [`sweep`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepResult {
    theta: f64,
    n_threshold: f64,
    n_values: DVector<f64>,
    series: Vec<RegimeSeries>,
    coincidence_tolerance: f64,
    coincidence_relative_tolerance: f64,
}

impl SweepResult {
    /// Curvature the sweep was run at.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Regime-switch marker `n_threshold(theta)`.
    pub fn n_threshold(&self) -> f64 {
        self.n_threshold
    }

    /// The retailer counts that were solved.
    pub fn n_values(&self) -> &DVector<f64> {
        &self.n_values
    }

    /// All series in the order the regimes were requested.
    pub fn all_series(&self) -> &[RegimeSeries] {
        &self.series
    }

    /// Series for `regime`, if it was part of the sweep.
    pub fn series(&self, regime: Regime) -> Option<&RegimeSeries> {
        self.series.iter().find(|series| series.regime == regime)
    }

    /// Column of `key` for `regime`, if it was part of the sweep.
    pub fn column(&self, regime: Regime, key: impl Into<SeriesKey>) -> Option<DVector<f64>> {
        self.series(regime).map(|series| series.column(key))
    }

    /// Pairs of regimes whose `key` columns agree at every grid point.
    ///
    /// Two values `x` (earlier regime) and `y` agree when
    /// `|x - y| <= atol + rtol * |y|`. Pairs are ordered as the regimes appear in the sweep, earlier regime first.
    pub fn coinciding(&self, key: impl Into<SeriesKey>) -> Vec<(Regime, Regime)> {
        let key = key.into();
        let columns: Vec<(Regime, DVector<f64>)> = self
            .series
            .iter()
            .map(|series| (series.regime, series.column(key)))
            .collect();

        let mut pairs = Vec::new();
        for (i, (first, a)) in columns.iter().enumerate() {
            for (second, b) in columns.iter().skip(i + 1) {
                let close = a
                    .iter()
                    .zip(b.iter())
                    .all(|(x, y)| {
                        (x - y).abs()
                            <= self.coincidence_tolerance
                                + self.coincidence_relative_tolerance * y.abs()
                    });
                if close {
                    pairs.push((*first, *second));
                }
            }
        }
        pairs
    }
}

/// Solves every configured regime at every grid point for a fixed `theta`.
pub fn sweep(theta: f64, options: &SweepOptions) -> Result<SweepResult> {
    validate_theta(theta)?;
    let n_values = options.grid()?;
    let threshold = n_threshold(theta)?;
    debug!(
        "sweeping theta={theta} over {} points for {} regimes",
        n_values.len(),
        options.regimes.len()
    );

    let series = options
        .regimes
        .iter()
        .map(|&regime| -> Result<RegimeSeries> {
            let points = if options.parallel {
                n_values
                    .as_slice()
                    .par_iter()
                    .map(|&n| solve_point(regime, theta, n))
                    .collect::<Result<Vec<_>>>()?
            } else {
                n_values
                    .iter()
                    .map(|&n| solve_point(regime, theta, n))
                    .collect::<Result<Vec<_>>>()?
            };
            Ok(RegimeSeries { regime, points })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("sweep for theta={theta} finished; n_threshold={threshold}");
    Ok(SweepResult {
        theta,
        n_threshold: threshold,
        n_values,
        series,
        coincidence_tolerance: options.coincidence_tolerance,
        coincidence_relative_tolerance: options.coincidence_relative_tolerance,
    })
}

fn solve_point(regime: Regime, theta: f64, n: f64) -> Result<Equilibrium> {
    regime.solve(&ParameterSet::new(theta, n)?)
}
