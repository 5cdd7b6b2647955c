//! Agent Trait
//!
//! One decision capability shared by both adversaries. Implementations only
//! supply the variant-specific hooks; strike scoring, softmax sampling and
//! the cold-start fallback are provided.

use jungle_core::{Action, AgentId, AgentKind, MarketState, OptionType, Strike};
use jungle_memory::MemoryStore;
use rand::RngCore;

use crate::policy;
use crate::profile::AgentProfile;

pub trait Agent: Send + Sync {
    /// Get agent's unique identifier
    fn id(&self) -> &AgentId;

    fn kind(&self) -> AgentKind;

    /// Variant-specific score for strike `index`
    ///
    /// Returns `None` when the strike is outside what this agent considers.
    fn base_score(&self, market: &MarketState, index: usize, profile: &AgentProfile)
    -> Option<f64>;

    /// Aggressiveness in [0, 1] for this tick's shot
    fn aggressiveness(
        &self,
        market: &MarketState,
        memory: &MemoryStore,
        profile: &AgentProfile,
    ) -> f64;

    /// Option type the agent intends to push at `strike`
    fn option_type(&self, strike: &Strike, profile: &AgentProfile) -> OptionType;

    /// Pick a target and produce this tick's action
    ///
    /// Never fails: with no eligible strike the agent falls back to the
    /// strike nearest spot, and an empty memory contributes no bias.
    fn decide(
        &self,
        market: &MarketState,
        memory: &MemoryStore,
        profile: &AgentProfile,
        rng: &mut dyn RngCore,
    ) -> Action {
        let index = policy::choose_strike(self, market, memory, profile, rng);
        let (price, option_type) = match market.strike(index) {
            Some(strike) => (strike.price, self.option_type(strike, profile)),
            None => (market.spot(), profile.preferred_option),
        };
        let aggressiveness = self.aggressiveness(market, memory, profile);

        log::debug!(
            "{} [{}] targets strike {} ({}) aggressiveness={:.3}",
            self.id(),
            self.kind(),
            price,
            option_type,
            aggressiveness
        );

        Action::new(
            self.id().clone(),
            self.kind(),
            index,
            price,
            option_type,
            aggressiveness,
        )
    }
}
