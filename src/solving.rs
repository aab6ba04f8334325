//! Closed-form solvers for the four market-design regimes.
//!
//! Each solver is a pure function of a [`ParameterSet`]. Only the RPM regimes
//! can fail, because their branch condition evaluates
//! [`n_threshold_all`](crate::threshold::n_threshold_all), which has a pole at
//! `theta = 1`.

use log::trace;

use crate::error::Result;
use crate::parameters::ParameterSet;
use crate::regime::Regime;
use crate::state::{Branch, EndogenousState, Equilibrium, SurplusState};
use crate::threshold::THETA_SWITCH;

/// Single-firm benchmark: the wholesaler sells directly to consumers.
pub fn solve_vertically_integrated(params: &ParameterSet) -> Equilibrium {
    let theta = params.theta();
    let n = params.n();

    let endogenous = EndogenousState {
        delivery: theta / 2.0,
        total_delivery: n * theta / 2.0,
        price_high: 0.5,
        price_low: 0.5,
        quantity_high: n / 2.0,
        quantity_low: 0.5,
        ..Default::default()
    };
    let surplus = SurplusState {
        consumer: (1.0 + theta) / 16.0,
        wholesaler: (1.0 + theta) / 8.0,
        retailer: 0.0,
    };

    Equilibrium {
        regime: Regime::VerticallyIntegrated,
        branch: Branch::Unbranched,
        parameters: *params,
        endogenous,
        surplus,
    }
}

/// Linear wholesale pricing without resale price maintenance.
pub fn solve_wholesale(params: &ParameterSet) -> Equilibrium {
    let theta = params.theta();
    let n = params.n();
    let n1 = n + 1.0;
    let share = n * n / (n1 * n1);

    let (branch, endogenous, surplus) = if theta >= THETA_SWITCH {
        let endogenous = EndogenousState {
            wholesale_price: 0.25,
            delivery: theta / (2.0 * n1),
            total_delivery: theta * n / (2.0 * n1),
            price_high: 1.0 - n / (2.0 * n1),
            price_low: 1.0 / n1,
            ..Default::default()
        };
        let surplus = SurplusState {
            consumer: theta * share / 16.0 + share / 4.0,
            retailer: 0.5 * (theta + 4.0) * n / (4.0 * n1 * n1),
            wholesaler: 0.25 * theta * n / (2.0 * n1),
        };
        (Branch::HighTheta, endogenous, surplus)
    } else {
        let scale = n1 * (1.0 + theta);
        let endogenous = EndogenousState {
            wholesale_price: 0.5,
            delivery: theta / scale,
            total_delivery: theta * n / scale,
            price_high: 1.0 - n / scale,
            price_low: 1.0 - theta * n / scale,
            ..Default::default()
        };
        let surplus = SurplusState {
            consumer: 0.25 * n * n * theta / (n1 * n1 * (1.0 + theta)),
            retailer: 0.5 * n * theta / (n1 * n1 * (1.0 + theta)),
            wholesaler: 0.5 * n * theta / scale,
        };
        (Branch::LowTheta, endogenous, surplus)
    };

    trace!("wholesale theta={theta} n={n} branch={branch:?}");
    Equilibrium {
        regime: Regime::Wholesale,
        branch,
        parameters: *params,
        endogenous,
        surplus,
    }
}

/// Maximum resale price maintenance: the wholesaler imposes a retail price ceiling.
///
/// The ceiling drives retail margins to zero, so retailer surplus is zero in
/// both branches.
pub fn solve_maximum_rpm(params: &ParameterSet) -> Result<Equilibrium> {
    let theta = params.theta();
    let n = params.n();
    let n1 = n + 1.0;

    let few_retailers = theta < THETA_SWITCH && n < params.n_threshold_all()?;

    let (branch, endogenous, surplus) = if few_retailers {
        let t1 = 1.0 + theta;
        let endogenous = EndogenousState {
            price_ceiling: Some(1.0 / t1),
            wholesale_price: 0.5,
            delivery: theta / (n * t1),
            total_delivery: theta / t1,
            price_high: theta / t1,
            price_low: 1.0 / t1,
            ..Default::default()
        };
        let surplus = SurplusState {
            consumer: theta * theta / (2.0 * t1 * t1),
            retailer: 0.0,
            wholesaler: theta / (t1 * t1),
        };
        (Branch::FewRetailers, endogenous, surplus)
    } else {
        let endogenous = EndogenousState {
            price_ceiling: Some(0.5),
            wholesale_price: 0.25 + n * n / (n1 * n1) / theta,
            delivery: theta / (2.0 * n),
            total_delivery: theta / 2.0,
            price_high: 0.5,
            price_low: 1.0 / n1,
            ..Default::default()
        };
        let surplus = SurplusState {
            consumer: theta / 16.0 + n * n / (4.0 * n1 * n1),
            retailer: 0.0,
            wholesaler: theta / 8.0 + 0.5 * n / (n1 * n1),
        };
        (Branch::ManyRetailers, endogenous, surplus)
    };

    trace!("maximum RPM theta={theta} n={n} branch={branch:?}");
    Ok(Equilibrium {
        regime: Regime::MaximumRpm,
        branch,
        parameters: *params,
        endogenous,
        surplus,
    })
}

/// Minimum resale price maintenance: the wholesaler imposes a retail price floor.
///
/// Below `n_threshold_all(theta)` the floor does not change the outcome and the
/// wholesale equilibrium is returned, re-tagged as this regime.
pub fn solve_minimum_rpm(params: &ParameterSet) -> Result<Equilibrium> {
    let theta = params.theta();
    let n = params.n();

    if n < params.n_threshold_all()? {
        trace!("minimum RPM theta={theta} n={n} delegates to wholesale");
        return Ok(Equilibrium {
            regime: Regime::MinimumRpm,
            ..solve_wholesale(params)
        });
    }

    let n1 = n + 1.0;
    let floor = 0.5;
    let endogenous = EndogenousState {
        price_ceiling: Some(floor),
        wholesale_price: 0.25 + 0.25 * (n - 1.0) * n1 / (n * n * theta),
        delivery: theta / (2.0 * n1),
        total_delivery: theta * n / (2.0 * n1),
        price_high: 1.0 - n / (2.0 * n1),
        price_low: floor,
        ..Default::default()
    };
    let surplus = SurplusState {
        consumer: theta * n * n / (16.0 * n1 * n1) + 1.0 / 16.0,
        retailer: n * theta / (8.0 * n1 * n1) + 1.0 / (8.0 * n),
        wholesaler: n * theta / (8.0 * n1) + (n - 1.0) / (8.0 * n),
    };

    trace!("minimum RPM theta={theta} n={n} branch=ManyRetailers");
    Ok(Equilibrium {
        regime: Regime::MinimumRpm,
        branch: Branch::ManyRetailers,
        parameters: *params,
        endogenous,
        surplus,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::DomainError;

    fn params(theta: f64, n: f64) -> ParameterSet {
        ParameterSet::new(theta, n).unwrap()
    }

    #[test]
    fn vertically_integrated_reference_values() {
        let eq = solve_vertically_integrated(&params(4.0, 10.0));
        assert_relative_eq!(eq.endogenous.delivery, 2.0);
        assert_relative_eq!(eq.endogenous.total_delivery, 20.0);
        assert_relative_eq!(eq.endogenous.price_high, 0.5);
        assert_relative_eq!(eq.endogenous.price_low, 0.5);
        assert_relative_eq!(eq.endogenous.quantity_high, 5.0);
        assert_relative_eq!(eq.endogenous.quantity_low, 0.5);
        assert_relative_eq!(eq.surplus.consumer, 0.3125);
        assert_relative_eq!(eq.surplus.wholesaler, 0.625);
        assert_eq!(eq.surplus.retailer, 0.0);
        assert_eq!(eq.endogenous.price_ceiling, None);
    }

    #[test]
    fn wholesale_high_theta_reference_values() {
        let eq = solve_wholesale(&params(4.0, 10.0));
        assert_eq!(eq.branch, Branch::HighTheta);
        assert_relative_eq!(eq.endogenous.wholesale_price, 0.25);
        assert_relative_eq!(eq.endogenous.delivery, 4.0 / 22.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.total_delivery, 40.0 / 22.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_high, 12.0 / 22.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_low, 1.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.consumer, 50.0 / 121.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.retailer, 10.0 / 121.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.wholesaler, 5.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn wholesale_low_theta_reference_values() {
        let eq = solve_wholesale(&params(2.0, 10.0));
        assert_eq!(eq.branch, Branch::LowTheta);
        assert_relative_eq!(eq.endogenous.wholesale_price, 0.5);
        assert_relative_eq!(eq.endogenous.delivery, 2.0 / 33.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.total_delivery, 20.0 / 33.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_high, 23.0 / 33.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_low, 13.0 / 33.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.consumer, 50.0 / 363.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.retailer, 10.0 / 363.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.wholesaler, 10.0 / 33.0, epsilon = 1e-12);
    }

    #[test]
    fn wholesale_uses_high_branch_at_switch() {
        assert_eq!(solve_wholesale(&params(3.0, 5.0)).branch, Branch::HighTheta);
        assert_eq!(
            solve_wholesale(&params(2.999, 5.0)).branch,
            Branch::LowTheta
        );
    }

    #[test]
    fn maximum_rpm_few_retailers_reference_values() {
        let eq = solve_maximum_rpm(&params(2.0, 2.0)).unwrap();
        assert_eq!(eq.branch, Branch::FewRetailers);
        assert_relative_eq!(eq.endogenous.price_ceiling(), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.wholesale_price, 0.5);
        assert_relative_eq!(eq.endogenous.delivery, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.total_delivery, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_high, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_low, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.consumer, 2.0 / 9.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.wholesaler, 2.0 / 9.0, epsilon = 1e-12);
        assert_eq!(eq.surplus.retailer, 0.0);
    }

    #[test]
    fn maximum_rpm_many_retailers_reference_values() {
        let eq = solve_maximum_rpm(&params(4.0, 10.0)).unwrap();
        assert_eq!(eq.branch, Branch::ManyRetailers);
        assert_relative_eq!(eq.endogenous.price_ceiling(), 0.5);
        assert_relative_eq!(
            eq.endogenous.wholesale_price,
            0.25 + 25.0 / 121.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(eq.endogenous.delivery, 0.2, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.total_delivery, 2.0);
        assert_relative_eq!(eq.endogenous.price_high, 0.5);
        assert_relative_eq!(eq.endogenous.price_low, 1.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.consumer, 0.25 + 25.0 / 121.0, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.wholesaler, 0.5 + 5.0 / 121.0, epsilon = 1e-12);
        assert_eq!(eq.surplus.retailer, 0.0);
    }

    #[test]
    fn maximum_rpm_skips_threshold_for_high_theta() {
        // theta >= 3 never consults n_threshold_all, so the pole cannot be reached.
        let eq = solve_maximum_rpm(&params(3.0, 1.0)).unwrap();
        assert_eq!(eq.branch, Branch::ManyRetailers);
    }

    #[test]
    fn minimum_rpm_many_retailers_reference_values() {
        let eq = solve_minimum_rpm(&params(4.0, 10.0)).unwrap();
        assert_eq!(eq.regime, Regime::MinimumRpm);
        assert_eq!(eq.branch, Branch::ManyRetailers);
        assert_relative_eq!(eq.endogenous.price_ceiling(), 0.5);
        assert_relative_eq!(eq.endogenous.wholesale_price, 0.311875, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.delivery, 4.0 / 22.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_high, 12.0 / 22.0, epsilon = 1e-12);
        assert_relative_eq!(eq.endogenous.price_low, 0.5);
        assert_relative_eq!(
            eq.surplus.consumer,
            25.0 / 121.0 + 1.0 / 16.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(eq.surplus.retailer, 5.0 / 121.0 + 0.0125, epsilon = 1e-12);
        assert_relative_eq!(eq.surplus.wholesaler, 5.0 / 11.0 + 0.1125, epsilon = 1e-12);
    }

    #[test]
    fn minimum_rpm_delegates_below_threshold() {
        let p = params(2.0, 2.0);
        let min_rpm = solve_minimum_rpm(&p).unwrap();
        let wholesale = solve_wholesale(&p);
        assert_eq!(min_rpm.regime, Regime::MinimumRpm);
        assert_eq!(min_rpm.branch, Branch::LowTheta);
        assert_eq!(min_rpm.endogenous, wholesale.endogenous);
        assert_eq!(min_rpm.surplus, wholesale.surplus);
        assert_eq!(min_rpm.endogenous.price_ceiling, None);
    }

    #[test]
    fn rpm_regimes_fail_at_threshold_pole() {
        let p = params(1.0, 4.0);
        assert!(matches!(
            solve_maximum_rpm(&p),
            Err(DomainError::Singularity { .. })
        ));
        assert!(matches!(
            solve_minimum_rpm(&p),
            Err(DomainError::Singularity { .. })
        ));
        // The unbranched regimes are defined there.
        assert!(solve_wholesale(&p).is_finite());
        assert!(solve_vertically_integrated(&p).is_finite());
    }
}
