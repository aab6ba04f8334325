//! Threshold functions that decide which algebraic branch of a regime applies.

use crate::error::{DomainError, Result};
use crate::parameters::validate_theta;

/// Curvature at which the wholesale regime switches branch.
pub const THETA_SWITCH: f64 = 3.0;

/// Retailer count below which RPM regimes use their small-market branch:
/// `(theta + 1) / (theta - 1)`.
///
/// The function has a pole at `theta = 1`, which is reported as
/// [`DomainError::Singularity`]. For `theta < 1` the value is negative, so every
/// admissible `n` lies above it.
pub fn n_threshold_all(theta: f64) -> Result<f64> {
    validate_theta(theta)?;
    if theta == 1.0 {
        return Err(DomainError::singularity("n_threshold_all", theta));
    }
    let value = (theta + 1.0) / (theta - 1.0);
    if !value.is_finite() {
        return Err(DomainError::singularity("n_threshold_all", theta));
    }
    Ok(value)
}

/// Regime-switch marker for `theta >= 3`:
/// `(1 + theta + sqrt((1 + theta)(4 + theta))) / 3`.
pub fn n_threshold_high(theta: f64) -> Result<f64> {
    validate_theta(theta)?;
    Ok((1.0 + theta + ((1.0 + theta) * (4.0 + theta)).sqrt()) / 3.0)
}

/// Retailer count reported as the regime switch for a given `theta`.
pub fn n_threshold(theta: f64) -> Result<f64> {
    if theta >= THETA_SWITCH {
        n_threshold_high(theta)
    } else {
        n_threshold_all(theta)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn threshold_all_matches_closed_form() {
        assert_relative_eq!(n_threshold_all(2.0).unwrap(), 3.0);
        assert_relative_eq!(n_threshold_all(4.0).unwrap(), 5.0 / 3.0);
        assert!(n_threshold_all(0.5).unwrap() < 0.0);
    }

    #[test]
    fn threshold_all_rejects_pole() {
        assert_eq!(
            n_threshold_all(1.0),
            Err(DomainError::Singularity {
                context: "n_threshold_all",
                theta: 1.0
            })
        );
    }

    #[test]
    fn thresholds_reject_non_positive_theta() {
        assert!(matches!(
            n_threshold_all(0.0),
            Err(DomainError::NonPositiveTheta { .. })
        ));
        assert!(matches!(
            n_threshold_high(-2.0),
            Err(DomainError::NonPositiveTheta { .. })
        ));
    }

    #[test]
    fn reported_threshold_switches_at_three() {
        assert_relative_eq!(n_threshold(2.0).unwrap(), 3.0);
        let expected = (5.0 + 40.0_f64.sqrt()) / 3.0;
        assert_relative_eq!(n_threshold(4.0).unwrap(), expected, epsilon = 1e-12);
        assert_relative_eq!(n_threshold(3.0).unwrap(), n_threshold_high(3.0).unwrap());
    }
}
