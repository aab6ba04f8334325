//! Stateful facade that owns a parameter set and the most recent snapshot.

use crate::error::Result;
use crate::parameters::ParameterSet;
use crate::regime::Regime;
use crate::state::{EndogenousState, Equilibrium, SurplusState};

/// Holds the current parameters and the latest solved equilibrium.
///
/// Mutation goes through `&mut self`, so sharing one engine across threads
/// requires the caller to serialize access. Independent engines need no
/// coordination.
#[derive(Clone, Debug)]
pub struct EquilibriumEngine {
    parameters: ParameterSet,
    latest: Option<Equilibrium>,
}

impl EquilibriumEngine {
    /// Creates an engine with no solved snapshot yet.
    pub fn new(parameters: ParameterSet) -> Self {
        Self {
            parameters,
            latest: None,
        }
    }

    /// Accessor for the current parameters.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Replaces the parameters used by subsequent solves.
    ///
    /// The stored snapshot still describes the parameters it was solved with.
    pub fn reparameterize(&mut self, parameters: ParameterSet) {
        self.parameters = parameters;
    }

    /// Replaces `theta`, keeping `n`. Leaves the engine unchanged on error.
    pub fn set_theta(&mut self, theta: f64) -> Result<()> {
        self.parameters = self.parameters.with_theta(theta)?;
        Ok(())
    }

    /// Replaces `n`, keeping `theta`. Leaves the engine unchanged on error.
    pub fn set_n(&mut self, n: f64) -> Result<()> {
        self.parameters = self.parameters.with_n(n)?;
        Ok(())
    }

    /// Solves `regime` at the current parameters and stores the snapshot.
    pub fn solve(&mut self, regime: Regime) -> Result<&Equilibrium> {
        let equilibrium = regime.solve(&self.parameters)?;
        let stored: &Equilibrium = self.latest.insert(equilibrium);
        Ok(stored)
    }

    /// Solves the vertically integrated benchmark and stores the snapshot.
    pub fn solve_vertically_integrated(&mut self) -> Result<&Equilibrium> {
        self.solve(Regime::VerticallyIntegrated)
    }

    /// Solves the wholesale regime and stores the snapshot.
    pub fn solve_wholesale(&mut self) -> Result<&Equilibrium> {
        self.solve(Regime::Wholesale)
    }

    /// Solves the maximum RPM regime and stores the snapshot.
    pub fn solve_maximum_rpm(&mut self) -> Result<&Equilibrium> {
        self.solve(Regime::MaximumRpm)
    }

    /// Solves the minimum RPM regime and stores the snapshot.
    pub fn solve_minimum_rpm(&mut self) -> Result<&Equilibrium> {
        self.solve(Regime::MinimumRpm)
    }

    /// Solves every regime at the current parameters without touching the stored snapshot.
    pub fn solve_all(&self) -> Result<Vec<Equilibrium>> {
        Regime::ALL
            .iter()
            .map(|regime| regime.solve(&self.parameters))
            .collect()
    }

    /// The most recent snapshot, if any solve has succeeded.
    pub fn latest(&self) -> Option<&Equilibrium> {
        self.latest.as_ref()
    }

    /// Endogenous state of the latest snapshot, all zeros before the first solve.
    pub fn endogenous(&self) -> EndogenousState {
        self.latest.map(|eq| eq.endogenous).unwrap_or_default()
    }

    /// Surplus state of the latest snapshot, all zeros before the first solve.
    pub fn surplus(&self) -> SurplusState {
        self.latest.map(|eq| eq.surplus).unwrap_or_default()
    }

    /// Regime-switch marker for the current `theta`.
    pub fn n_threshold(&self) -> Result<f64> {
        self.parameters.n_threshold()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::DomainError;

    #[test]
    fn defaults_before_first_solve() {
        let engine = EquilibriumEngine::new(ParameterSet::new(4.0, 10.0).unwrap());
        assert!(engine.latest().is_none());
        assert_eq!(engine.endogenous(), EndogenousState::default());
        assert_eq!(engine.surplus(), SurplusState::default());
    }

    #[test]
    fn reparameterizing_keeps_captured_snapshot() {
        let mut engine = EquilibriumEngine::new(ParameterSet::new(4.0, 10.0).unwrap());
        let captured = *engine.solve_wholesale().unwrap();
        assert_relative_eq!(captured.endogenous.wholesale_price, 0.25);

        engine.set_theta(2.0).unwrap();
        assert_eq!(engine.latest(), Some(&captured));
        assert_eq!(captured.parameters.theta(), 4.0);

        let resolved = engine.solve_wholesale().unwrap();
        assert_relative_eq!(resolved.endogenous.wholesale_price, 0.5);
    }

    #[test]
    fn each_solve_starts_from_a_fresh_snapshot() {
        let mut engine = EquilibriumEngine::new(ParameterSet::new(2.0, 10.0).unwrap());
        engine.solve_maximum_rpm().unwrap();
        assert_relative_eq!(engine.endogenous().price_ceiling(), 0.5);

        engine.solve_vertically_integrated().unwrap();
        assert_eq!(engine.endogenous().price_ceiling, None);
        assert_eq!(engine.surplus().retailer, 0.0);
    }

    #[test]
    fn failed_updates_leave_engine_unchanged() {
        let params = ParameterSet::new(2.0, 10.0).unwrap();
        let mut engine = EquilibriumEngine::new(params);
        assert!(matches!(
            engine.set_theta(-1.0),
            Err(DomainError::NonPositiveTheta { .. })
        ));
        assert!(engine.set_n(0.0).is_err());
        assert_eq!(engine.parameters(), &params);
    }

    #[test]
    fn failed_solve_keeps_previous_snapshot() {
        let mut engine = EquilibriumEngine::new(ParameterSet::new(1.0, 2.0).unwrap());
        engine.solve_wholesale().unwrap();
        assert!(engine.solve_minimum_rpm().is_err());
        assert_eq!(engine.latest().map(|eq| eq.regime), Some(Regime::Wholesale));
        assert!(engine.solve_all().is_err());
    }

    #[test]
    fn solve_all_returns_one_snapshot_per_regime() {
        let engine = EquilibriumEngine::new(ParameterSet::new(4.0, 10.0).unwrap());
        let snapshots = engine.solve_all().unwrap();
        let regimes: Vec<_> = snapshots.iter().map(|eq| eq.regime).collect();
        assert_eq!(regimes, Regime::ALL.to_vec());
        assert!(engine.latest().is_none());
        assert_relative_eq!(engine.n_threshold().unwrap(), (5.0 + 40.0_f64.sqrt()) / 3.0);
    }
}
