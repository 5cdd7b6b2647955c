//! Jungle Memory
//!
//! Per-agent experience store: bounded, curated by importance and recency,
//! queried by strike similarity.

mod config;
mod entry;
mod store;

pub use config::MemoryConfig;
pub use entry::{MemoryEntry, RecallContext};
pub use store::{MemoryStore, MemorySummary};
