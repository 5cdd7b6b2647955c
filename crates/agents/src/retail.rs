//! Retail Agent
//!
//! Momentum-chasing crowd. It likes strikes where gamma is building, close to
//! spot, tilted toward the direction of its favourite option, and it piles in
//! harder after a run of hits.

use jungle_core::{AgentId, AgentKind, MarketState, OptionType, Strike};
use jungle_memory::MemoryStore;

use crate::agent::Agent;
use crate::profile::AgentProfile;

/// Scale applied to the normalised exposure trend
const TREND_GAIN: f64 = 20.0;

/// Aggressiveness added when the FOMO check fires
const FOMO_BOOST: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct RetailAgent {
    id: AgentId,
}

impl RetailAgent {
    pub fn new(id: AgentId) -> Self {
        Self { id }
    }

    /// Furthest distance from spot the crowd will shoot at
    pub fn reach(market: &MarketState, profile: &AgentProfile) -> f64 {
        market
            .strike_spacing()
            .max(profile.risk_tolerance * market.ladder_span())
    }

    /// True when recent success exceeds the profile's FOMO threshold
    pub fn is_fomo(memory: &MemoryStore, profile: &AgentProfile) -> bool {
        memory.recorded() > 0 && memory.recent_hit_rate(profile.fomo_window) > profile.fomo_threshold
    }
}

impl Default for RetailAgent {
    fn default() -> Self {
        Self::new(AgentId::new("retail"))
    }
}

impl Agent for RetailAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Retail
    }

    fn base_score(
        &self,
        market: &MarketState,
        index: usize,
        profile: &AgentProfile,
    ) -> Option<f64> {
        let strike = market.strike(index)?;
        let spot = market.spot();
        let reach = Self::reach(market, profile);
        let distance = strike.distance_to(spot);
        if distance > reach {
            return None;
        }

        let max_exposure = market.max_exposure();
        let trend = if max_exposure > 0.0 {
            market.exposure_trend(index) / max_exposure
        } else {
            0.0
        };

        let spacing = market.strike_spacing().max(f64::EPSILON);
        let proximity = 1.0 / (1.0 + distance / spacing);

        // Calls want strikes above spot, puts below
        let direction = match profile.preferred_option {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        };
        let upside = if reach > 0.0 {
            (strike.price - spot) / reach
        } else {
            0.0
        };

        Some(TREND_GAIN * trend + proximity + profile.optimism_bias * direction * upside)
    }

    fn aggressiveness(
        &self,
        _market: &MarketState,
        memory: &MemoryStore,
        profile: &AgentProfile,
    ) -> f64 {
        let base = 0.2 + 0.4 * profile.risk_tolerance + 0.2 * profile.optimism_bias;
        let boost = if Self::is_fomo(memory, profile) {
            log::debug!("{}: FOMO kicks in (streak {})", self.id, memory.hit_streak());
            FOMO_BOOST
        } else {
            0.0
        };
        (base + boost).clamp(0.0, 1.0)
    }

    fn option_type(&self, _strike: &Strike, profile: &AgentProfile) -> OptionType {
        profile.preferred_option
    }
}
