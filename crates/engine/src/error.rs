use jungle_core::InvariantViolation;
use jungle_ports::{ConfigurationError, PersistenceError};
use thiserror::Error;

use crate::snapshot::SessionStatus;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Fatal: the session is halted and reports where it broke
    #[error("Invariant violated at tick {tick}: {source}")]
    Invariant {
        tick: u64,
        #[source]
        source: InvariantViolation,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Session halted at tick {tick}; reset to continue")]
    Halted { tick: u64 },

    /// A plan reached `commit` after a pause or once the trial budget ran out
    #[error("Session is {status} at tick {tick}; plan not committed")]
    NotRunning { tick: u64, status: SessionStatus },

    #[error("Plan for tick {planned} is stale (session is at tick {current})")]
    StalePlan { planned: u64, current: u64 },

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
