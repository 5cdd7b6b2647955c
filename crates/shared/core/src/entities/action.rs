use serde::{Deserialize, Serialize};

use crate::values::{AgentId, AgentKind, OptionType};

/// What an agent intends to do this tick
///
/// Transient: produced by a decision and consumed by the resolver in the same tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub agent: AgentId,
    pub kind: AgentKind,
    /// Index into the strike ladder
    pub strike_index: usize,
    /// Target strike price (copied from the ladder at decision time)
    pub strike: f64,
    pub option_type: OptionType,
    /// Aggressiveness in [0, 1]: more power, less accuracy
    pub aggressiveness: f64,
}

impl Action {
    pub fn new(
        agent: AgentId,
        kind: AgentKind,
        strike_index: usize,
        strike: f64,
        option_type: OptionType,
        aggressiveness: f64,
    ) -> Self {
        Self {
            agent,
            kind,
            strike_index,
            strike,
            option_type,
            aggressiveness: aggressiveness.clamp(0.0, 1.0),
        }
    }
}

/// Result of firing one projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileOutcome {
    pub action: Action,
    pub hit: bool,
    /// Payout; zero on miss
    pub juice: f64,
    /// Hit probability the rolls were tested against
    pub hit_probability: f64,
    /// Uniform draw in [0, 1) compared to `hit_probability`
    pub accuracy_roll: f64,
    /// Power multiplier draw
    pub power_roll: f64,
    /// Slingshot expiry could not reach the strike (automatic miss)
    pub expired: bool,
    /// Target was defended by the opposing agent this tick
    pub contested: bool,
}

impl ProjectileOutcome {
    pub fn agent_kind(&self) -> AgentKind {
        self.action.kind
    }

    pub fn strike_index(&self) -> usize {
        self.action.strike_index
    }
}
