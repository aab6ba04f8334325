//! Closed-form equilibria for a two-tier vertical supply chain.
//!
//! One wholesaler sells through `n` symmetric retailers to consumers whose
//! willingness to pay is either high or low. A single curvature/cost parameter
//! `theta` governs the model. For a given `(theta, n)` this crate computes
//! prices, deliveries and the split of surplus between consumers, the
//! wholesaler and the retailers under four market designs:
//!
//! - vertical integration (single-firm benchmark),
//! - linear wholesale pricing,
//! - maximum resale price maintenance (a retail price ceiling), and
//! - minimum resale price maintenance (a retail price floor).
//!
//! Every regime is a closed form. The only decisions are threshold comparisons
//! (`theta` against 3, `n` against [`threshold::n_threshold_all`]) that pick an
//! algebraic branch.
//!
//! # Quick start
//!
//! ```no_run
//! use rpm_equilibrium::{ParameterSet, Regime, SweepOptions};
//!
//! let params = ParameterSet::new(4.0, 10.0).expect("valid parameters");
//! let wholesale = Regime::Wholesale.solve(&params).expect("solvable");
//! println!("wholesale price: {}", wholesale.endogenous.wholesale_price);
//!
//! // Dense sweep over the retailer count, as used for plotting.
//! let result = rpm_equilibrium::sweep::sweep(2.0, &SweepOptions::default())
//!     .expect("valid grid");
//! println!("regime switch at n = {}", result.n_threshold());
//! ```

pub mod engine;
pub mod error;
pub mod options;
pub mod parameters;
pub mod regime;
pub mod sampling;
pub mod solving;
pub mod state;
pub mod sweep;
pub mod threshold;

pub use engine::EquilibriumEngine;
pub use error::{DomainError, Result};
pub use options::SweepOptions;
pub use parameters::ParameterSet;
pub use regime::Regime;
pub use state::{Branch, EndogenousKey, EndogenousState, Equilibrium, SurplusKey, SurplusState};
pub use sweep::{SeriesKey, SweepResult};
