//! Error types for trajectory evaluation and structure layout.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations detected before any sample is computed.
///
/// Evaluation is pure, so none of these are retryable: the caller passed
/// bad input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Damping ratio outside `[0, 1)`; the underdamped solution does not apply.
    #[error("invalid damping ratio {0}: must be in [0, 1)")]
    InvalidDampingRatio(f64),

    /// Pendulum length must be strictly positive.
    #[error("invalid pendulum length {0} m: must be > 0")]
    InvalidLength(f64),

    /// Bob mass must be strictly positive.
    #[error("invalid mass {0} kg: must be > 0")]
    InvalidMass(f64),

    /// Gravitational acceleration must be strictly positive.
    #[error("invalid gravity {0} m/s^2: must be > 0")]
    InvalidGravity(f64),

    /// A parameter was NaN or infinite.
    #[error("parameter '{name}' is not finite: {value}")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The time grid has no samples.
    #[error("time grid is empty")]
    EmptyTimeGrid,

    /// The requested grid would exceed [`MAX_SAMPLES`](crate::MAX_SAMPLES).
    #[error("time grid of {requested} samples exceeds the limit of {limit}")]
    TooManySamples {
        /// Requested sample count, before rounding or truncation.
        requested: f64,
        /// Largest accepted sample count.
        limit: usize,
    },

    /// The sweep has no cases to evaluate.
    #[error("sweep has no cases")]
    EmptySweep,

    /// A time sample was negative.
    #[error("time sample {index} is negative: {value} s")]
    NegativeTime {
        /// Position in the grid.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// A structure dimension was zero, negative, or not finite.
    #[error("invalid structure dimension '{name}': {value}")]
    InvalidDimension {
        /// Dimension name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Rejects NaN and infinities, tagging the error with the parameter name.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite { name, value })
    }
}
