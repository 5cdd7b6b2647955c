//! Jungle Engine
//!
//! Orchestration for the Monkey Jungle: session configuration, market data
//! sources, the tick loop that closes the reflexive feedback loop, control
//! commands and snapshots for rendering and persistence.

pub mod commands;
pub mod config;
pub mod error;
pub mod market_data;
pub mod reflexivity;
pub mod session;
pub mod snapshot;
pub mod statistics;

pub use commands::Command;
pub use config::{SessionConfig, load_config, load_config_from_str, load_default_config};
pub use error::{Result, SessionError};
pub use market_data::{LadderShape, MarketSetup, StaticMarketData, SyntheticLadder};
pub use session::{SimulationSession, TickPlan, TickReport};
pub use snapshot::{
    AgentState, AgentView, HaltRecord, RenderSnapshot, SessionSnapshot, SessionStatus,
};
pub use statistics::{AgentTally, SessionStatistics, StrikeStatistics};
