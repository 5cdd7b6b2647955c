//! Jungle Agents
//!
//! Decision policies for the two adversaries: the Retail crowd and the
//! Market Maker. Both implement [`Agent`] and share its scoring machinery.

mod agent;
mod market_maker;
pub mod policy;
mod profile;
mod retail;

pub use agent::Agent;
pub use market_maker::MarketMakerAgent;
pub use profile::AgentProfile;
pub use retail::RetailAgent;

use jungle_core::{AgentId, AgentKind};

/// Build the policy for an agent kind
pub fn build_agent(kind: AgentKind) -> Box<dyn Agent> {
    match kind {
        AgentKind::Retail => Box::new(RetailAgent::new(AgentId::new("retail"))),
        AgentKind::MarketMaker => Box::new(MarketMakerAgent::new(AgentId::new("market_maker"))),
    }
}
