//! Jungle Runner
//!
//! Headless driver for a jungle session:
//!
//! - **Save**: JSON file sink for session snapshots
//! - **Summary**: end-of-run scoreboard
//!
//! The binary (`jungle-runner`) wires these to the command line.

pub mod save;
pub mod summary;

pub use save::JsonFileSink;
pub use summary::{AgentSummary, RunSummary};
