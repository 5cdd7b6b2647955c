//! Jungle Core Domain
//!
//! Pure domain types for the Monkey Jungle reflexivity engine.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod market;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Action, GammaPoint, ProjectileOutcome, Strike};
pub use error::InvariantViolation;
pub use market::{ExposureShift, MarketDynamics, MarketState};
pub use values::{AgentId, AgentKind, DteBand, OptionBias, OptionType};
