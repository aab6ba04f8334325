//! The closed set of market-design regimes and their dispatch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};
use crate::parameters::ParameterSet;
use crate::solving::{
    solve_maximum_rpm, solve_minimum_rpm, solve_vertically_integrated, solve_wholesale,
};
use crate::state::Equilibrium;

/// Market-design arrangement between the wholesaler and its retailers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Wholesaler and retailers act as a single firm.
    VerticallyIntegrated,
    /// Linear wholesale pricing, no price restraint.
    Wholesale,
    /// Wholesale pricing plus a retail price ceiling.
    MaximumRpm,
    /// Wholesale pricing plus a retail price floor.
    MinimumRpm,
}

impl Regime {
    /// All regimes in reporting order.
    pub const ALL: [Regime; 4] = [
        Regime::VerticallyIntegrated,
        Regime::Wholesale,
        Regime::MaximumRpm,
        Regime::MinimumRpm,
    ];

    /// Stable snake_case identifier, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Regime::VerticallyIntegrated => "vertically_integrated",
            Regime::Wholesale => "wholesale",
            Regime::MaximumRpm => "maximum_rpm",
            Regime::MinimumRpm => "minimum_rpm",
        }
    }

    /// Human-readable label for legends and reports.
    pub fn label(self) -> &'static str {
        match self {
            Regime::VerticallyIntegrated => "Vertically Integrated",
            Regime::Wholesale => "Wholesale",
            Regime::MaximumRpm => "Maximum RPM",
            Regime::MinimumRpm => "Minimum RPM",
        }
    }

    /// Solves this regime at `params`.
    pub fn solve(self, params: &ParameterSet) -> Result<Equilibrium> {
        let equilibrium = match self {
            Regime::VerticallyIntegrated => solve_vertically_integrated(params),
            Regime::Wholesale => solve_wholesale(params),
            Regime::MaximumRpm => solve_maximum_rpm(params)?,
            Regime::MinimumRpm => solve_minimum_rpm(params)?,
        };
        if !equilibrium.is_finite() {
            return Err(DomainError::NumericalError {
                context: self.key(),
            });
        }
        Ok(equilibrium)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
