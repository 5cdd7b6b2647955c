//! Market Dynamics
//!
//! Parameters for passive decay, the spot random walk and the reflexive update.

use serde::{Deserialize, Serialize};

/// Parameters governing how the gamma surface evolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDynamics {
    /// Passive exposure decay per tick, in (0, 1)
    pub decay_factor: f64,

    /// Standard deviation of the fractional spot move per tick
    pub spot_volatility: f64,

    /// Hard bound on the fractional spot move per tick, in [0, 1)
    pub max_spot_step: f64,

    /// Exposure removed from the target per unit of juice on a hit
    pub reduction_rate: f64,

    /// Share of the removed exposure re-hedged onto adjacent strikes, in [0, 1]
    pub spillover_fraction: f64,

    /// Fractional exposure increase at the target on a miss
    pub miss_reinforcement: f64,
}

impl Default for MarketDynamics {
    fn default() -> Self {
        Self {
            decay_factor: 0.995,
            spot_volatility: 0.002,
            max_spot_step: 0.01,
            reduction_rate: 1.0,
            spillover_fraction: 0.3,
            miss_reinforcement: 0.01,
        }
    }
}

impl MarketDynamics {
    /// Frozen market: no decay, no spot movement
    pub fn frozen() -> Self {
        Self {
            decay_factor: 1.0 - f64::EPSILON,
            spot_volatility: 0.0,
            max_spot_step: 0.0,
            ..Default::default()
        }
    }

    /// Choppy market with faster decay and bigger spot moves
    pub fn volatile() -> Self {
        Self {
            decay_factor: 0.98,
            spot_volatility: 0.006,
            max_spot_step: 0.03,
            spillover_fraction: 0.5,
            ..Default::default()
        }
    }

    pub fn with_decay_factor(mut self, decay_factor: f64) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    pub fn with_spillover_fraction(mut self, fraction: f64) -> Self {
        self.spillover_fraction = fraction;
        self
    }

    pub fn with_reduction_rate(mut self, rate: f64) -> Self {
        self.reduction_rate = rate;
        self
    }

    pub fn with_miss_reinforcement(mut self, reinforcement: f64) -> Self {
        self.miss_reinforcement = reinforcement;
        self
    }
}
