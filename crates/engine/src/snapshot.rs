//! Session Snapshots
//!
//! `RenderSnapshot` is a read-only view for drawing a frame.
//! `SessionSnapshot` is the full serialisable state for a save manager.

use jungle_agents::AgentProfile;
use jungle_core::{Action, AgentKind, GammaPoint, InvariantViolation, MarketState, ProjectileOutcome};
use jungle_memory::{MemoryStore, MemorySummary};
use jungle_ports::ConfigResult;
use jungle_resolver::SlingshotConfig;
use serde::{Deserialize, Serialize};

use crate::statistics::SessionStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Paused,
    /// An invariant broke; only a reset continues
    Halted,
    /// Trial budget exhausted
    Finished,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Running => write!(f, "running"),
            SessionStatus::Paused => write!(f, "paused"),
            SessionStatus::Halted => write!(f, "halted"),
            SessionStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Which invariant stopped the session, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaltRecord {
    pub tick: u64,
    pub reason: String,
}

impl HaltRecord {
    pub fn new(tick: u64, violation: &InvariantViolation) -> Self {
        Self {
            tick,
            reason: violation.to_string(),
        }
    }
}

/// One agent as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub kind: AgentKind,
    pub enabled: bool,
    pub profile: String,
    pub slingshot: String,
    pub last_action: Option<Action>,
    pub last_outcome: Option<ProjectileOutcome>,
    pub memory: MemorySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub spot: f64,
    pub status: SessionStatus,
    pub halt: Option<HaltRecord>,
    pub gamma_profile: Vec<GammaPoint>,
    pub retail: AgentView,
    pub market_maker: AgentView,
    pub statistics: SessionStatistics,
}

/// Persisted state of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub enabled: bool,
    pub profile: AgentProfile,
    pub slingshot: SlingshotConfig,
    pub memory: MemoryStore,
}

impl AgentState {
    /// Same checks a configuration load applies, plus the memory bound
    pub fn validate(&self) -> ConfigResult<()> {
        self.profile.validate()?;
        self.slingshot.validate()?;
        self.memory.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub status: SessionStatus,
    pub market: MarketState,
    pub retail: AgentState,
    pub market_maker: AgentState,
    pub statistics: SessionStatistics,
}

impl SessionSnapshot {
    pub fn tick(&self) -> u64 {
        self.market.tick()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
