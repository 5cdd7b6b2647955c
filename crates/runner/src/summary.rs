//! Run Summary
//!
//! End-of-run scoreboard derived from a session's statistics and market.

use jungle_core::AgentKind;
use jungle_engine::{AgentTally, SessionStatus, SimulationSession};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub kind: AgentKind,
    pub profile: String,
    pub slingshot: String,
    pub shots: u64,
    pub hits: u64,
    pub hit_rate: f64,
    pub expired: u64,
    pub contested: u64,
    pub juice: f64,
}

impl AgentSummary {
    fn from_tally(session: &SimulationSession, kind: AgentKind, tally: &AgentTally) -> Self {
        Self {
            kind,
            profile: session.profile(kind).name.clone(),
            slingshot: session.slingshot(kind).name.clone(),
            shots: tally.shots,
            hits: tally.hits,
            hit_rate: tally.hit_rate(),
            expired: tally.expired,
            contested: tally.contested,
            juice: tally.juice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub status: SessionStatus,
    pub halt_reason: Option<String>,
    pub final_spot: f64,
    pub total_exposure: f64,
    /// Strike with the most hits, if anything landed
    pub hottest_strike: Option<f64>,
    pub retail: AgentSummary,
    pub market_maker: AgentSummary,
}

impl RunSummary {
    pub fn from_session(session: &SimulationSession) -> Self {
        let stats = session.statistics();
        Self {
            seed: session.seed(),
            ticks: session.market().tick(),
            status: session.status(),
            halt_reason: session.halt_record().map(|h| h.reason.clone()),
            final_spot: session.market().spot(),
            total_exposure: session.market().total_exposure(),
            hottest_strike: stats.hottest_strike().map(|s| s.strike),
            retail: AgentSummary::from_tally(session, AgentKind::Retail, &stats.retail),
            market_maker: AgentSummary::from_tally(
                session,
                AgentKind::MarketMaker,
                &stats.market_maker,
            ),
        }
    }

    /// Write the scoreboard to the log at info level
    pub fn log_report(&self) {
        log::info!("=== Jungle run summary ===");
        log::info!(
            "Seed {} | {} ticks | status {} | spot {:.2} | exposure {:.2}",
            self.seed,
            self.ticks,
            self.status,
            self.final_spot,
            self.total_exposure
        );
        if let Some(reason) = &self.halt_reason {
            log::warn!("Halted: {}", reason);
        }
        for agent in [&self.retail, &self.market_maker] {
            log::info!(
                "{} [{} / {}]: {} shots, {} hits ({:.1}%), {} expired, {} contested, juice {:.2}",
                agent.kind,
                agent.profile,
                agent.slingshot,
                agent.shots,
                agent.hits,
                agent.hit_rate * 100.0,
                agent.expired,
                agent.contested,
                agent.juice
            );
        }
        match self.hottest_strike {
            Some(strike) => log::info!("Hottest strike: {:.2}", strike),
            None => log::info!("No hits landed"),
        }
    }
}
