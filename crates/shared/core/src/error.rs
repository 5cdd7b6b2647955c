use thiserror::Error;

/// Broken market invariants. Any of these is fatal for a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("Strike ladder is empty")]
    EmptyLadder,

    #[error("Strike ladder not strictly increasing at index {index}: {previous} >= {next}")]
    NonMonotonicStrikes {
        index: usize,
        previous: f64,
        next: f64,
    },

    #[error("Negative gamma exposure {exposure} at strike {strike}")]
    NegativeExposure { strike: f64, exposure: f64 },

    #[error("Non-finite gamma exposure at strike {strike}")]
    NonFiniteExposure { strike: f64 },

    #[error("Invalid spot price: {0}")]
    InvalidSpot(f64),

    #[error("Strike index {index} out of range for ladder of {len} strikes")]
    StrikeOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, InvariantViolation>;
