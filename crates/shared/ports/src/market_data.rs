use jungle_core::Strike;
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

/// Initial spot and strike ladder handed to the core, ready to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSeed {
    pub spot: f64,
    pub strikes: Vec<Strike>,
}

/// Port for market data input
///
/// This allows the session to start from different sources:
/// - Real gamma values loaded by an external data loader
/// - A synthetic ladder when no data is available
/// - Fixed ladders for deterministic tests
pub trait MarketDataSource {
    /// Produce the initial market; must satisfy the strike invariants
    fn load(&self) -> ConfigResult<MarketSeed>;

    /// Source name for logging
    fn name(&self) -> &str {
        "MarketDataSource"
    }
}
