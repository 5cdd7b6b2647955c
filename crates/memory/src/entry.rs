use jungle_core::{OptionType, ProjectileOutcome};
use serde::{Deserialize, Serialize};

/// One remembered shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Monotonic id assigned by the store on record
    pub seq: u64,
    /// Tick the shot was fired on
    pub tick: u64,
    pub strike_index: usize,
    pub strike: f64,
    pub option_type: OptionType,
    pub aggressiveness: f64,
    pub hit: bool,
    pub juice: f64,
    /// Recomputed on every curation pass
    pub importance: f64,
    /// Entry is dropped once the latest tick reaches this value
    pub expires_at: Option<u64>,
}

impl MemoryEntry {
    /// Build an entry from a resolved shot
    ///
    /// `ttl` is the number of ticks the entry survives; `None` keeps it until evicted.
    pub fn from_outcome(outcome: &ProjectileOutcome, tick: u64, ttl: Option<u64>) -> Self {
        Self {
            seq: 0,
            tick,
            strike_index: outcome.action.strike_index,
            strike: outcome.action.strike,
            option_type: outcome.action.option_type,
            aggressiveness: outcome.action.aggressiveness,
            hit: outcome.hit,
            juice: outcome.juice,
            importance: outcome.juice.abs(),
            expires_at: ttl.map(|ttl| tick.saturating_add(ttl)),
        }
    }

    pub fn is_expired(&self, current_tick: u64) -> bool {
        self.expires_at.is_some_and(|at| current_tick >= at)
    }
}

/// Query for similarity retrieval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecallContext {
    pub strike: f64,
    pub option_type: OptionType,
}

impl RecallContext {
    pub fn new(strike: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            option_type,
        }
    }
}
