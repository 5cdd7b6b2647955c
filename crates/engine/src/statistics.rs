//! Session Statistics
//!
//! Cumulative scoreboard: per-strike hit and juice tables plus per-agent totals.

use jungle_core::{AgentKind, ExposureShift, MarketState, ProjectileOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrikeStatistics {
    pub strike: f64,
    pub shots: u64,
    pub hits: u64,
    pub retail_juice: f64,
    pub market_maker_juice: f64,
    pub exposure_removed: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentTally {
    pub shots: u64,
    pub hits: u64,
    pub expired: u64,
    pub contested: u64,
    pub juice: f64,
}

impl AgentTally {
    pub fn hit_rate(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.hits as f64 / self.shots as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub ticks: u64,
    pub strikes: Vec<StrikeStatistics>,
    pub retail: AgentTally,
    pub market_maker: AgentTally,
}

impl SessionStatistics {
    /// Empty tables sized to the market's ladder
    pub fn for_market(market: &MarketState) -> Self {
        Self {
            strikes: market
                .strikes()
                .iter()
                .map(|s| StrikeStatistics {
                    strike: s.price,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn tally(&self, kind: AgentKind) -> &AgentTally {
        match kind {
            AgentKind::Retail => &self.retail,
            AgentKind::MarketMaker => &self.market_maker,
        }
    }

    pub fn record(&mut self, outcome: &ProjectileOutcome, shift: &ExposureShift) {
        let tally = match outcome.agent_kind() {
            AgentKind::Retail => &mut self.retail,
            AgentKind::MarketMaker => &mut self.market_maker,
        };
        tally.shots += 1;
        tally.hits += u64::from(outcome.hit);
        tally.expired += u64::from(outcome.expired);
        tally.contested += u64::from(outcome.contested);
        tally.juice += outcome.juice;

        if let Some(row) = self.strikes.get_mut(outcome.strike_index()) {
            row.shots += 1;
            if outcome.hit {
                row.hits += 1;
                match outcome.agent_kind() {
                    AgentKind::Retail => row.retail_juice += outcome.juice,
                    AgentKind::MarketMaker => row.market_maker_juice += outcome.juice,
                }
            }
            row.exposure_removed += shift.removed;
        }
    }

    /// Strike with the most hits (lowest strike wins ties)
    pub fn hottest_strike(&self) -> Option<&StrikeStatistics> {
        self.strikes
            .iter()
            .filter(|s| s.hits > 0)
            .fold(None, |best: Option<&StrikeStatistics>, s| match best {
                Some(b) if b.hits >= s.hits => Some(b),
                _ => Some(s),
            })
    }
}
