use thiserror::Error;

/// Unified error type for `rpm-equilibrium` operations.
///
/// Every failure in this crate comes from an input outside the model's domain.
/// The arithmetic itself is deterministic, so nothing here is transient.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    /// Raised when the curvature parameter is zero, negative, or not finite.
    #[error("theta must be strictly positive and finite, found {theta}")]
    NonPositiveTheta { theta: f64 },

    /// Raised when fewer than one retailer is requested.
    #[error("retailer count n must be finite and at least one, found {n}")]
    TooFewRetailers { n: f64 },

    /// Raised when a threshold function is evaluated at a pole.
    #[error("{context} is undefined at theta = {theta}")]
    Singularity {
        /// Name of the function that hit the pole.
        context: &'static str,
        /// The offending parameter value.
        theta: f64,
    },

    /// Raised when a solver produces NaN or an infinite value.
    #[error("encountered a non-finite value during {context}")]
    NumericalError { context: &'static str },

    /// Raised when a sweep grid or sampling range cannot be constructed.
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: &'static str },
}

impl DomainError {
    /// Helper to raise when a threshold function is evaluated at its pole.
    pub fn singularity(context: &'static str, theta: f64) -> Self {
        Self::Singularity { context, theta }
    }

    /// Helper for rejecting malformed grids and ranges.
    pub fn invalid_grid(reason: &'static str) -> Self {
        Self::InvalidGrid { reason }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, DomainError>;
