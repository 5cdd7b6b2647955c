//! Market Maker Agent
//!
//! Defends the strikes near spot where dealer gamma is concentrated. Risk
//! aversion both narrows what it defends and softens how hard it fires.

use jungle_core::{AgentId, AgentKind, MarketState, OptionType, Strike};
use jungle_memory::MemoryStore;

use crate::agent::Agent;
use crate::profile::AgentProfile;

#[derive(Debug, Clone)]
pub struct MarketMakerAgent {
    id: AgentId,
}

impl MarketMakerAgent {
    pub fn new(id: AgentId) -> Self {
        Self { id }
    }
}

impl Default for MarketMakerAgent {
    fn default() -> Self {
        Self::new(AgentId::new("market_maker"))
    }
}

impl Agent for MarketMakerAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn kind(&self) -> AgentKind {
        AgentKind::MarketMaker
    }

    fn base_score(
        &self,
        market: &MarketState,
        index: usize,
        profile: &AgentProfile,
    ) -> Option<f64> {
        let strike = market.strike(index)?;
        let distance = strike.distance_to(market.spot());
        if distance > profile.defense_radius {
            return None;
        }

        let max_exposure = market.max_exposure();
        let relative = if max_exposure > 0.0 {
            strike.exposure / max_exposure
        } else {
            0.0
        };

        Some(relative - profile.risk_aversion * distance / profile.defense_radius)
    }

    /// Strictly decreasing in `risk_aversion`, from 0.9 down to 0.2
    fn aggressiveness(
        &self,
        _market: &MarketState,
        _memory: &MemoryStore,
        profile: &AgentProfile,
    ) -> f64 {
        (0.9 - 0.7 * profile.risk_aversion).clamp(0.0, 1.0)
    }

    fn option_type(&self, strike: &Strike, _profile: &AgentProfile) -> OptionType {
        strike.bias.option_type().unwrap_or(OptionType::Put)
    }
}
