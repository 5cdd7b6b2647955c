//! Jungle Ports
//!
//! Port definitions (traits) for the Monkey Jungle reflexivity engine.
//! These define the boundaries between the core and its collaborators
//! (data loaders, config loaders, save managers).

mod error;
mod market_data;
mod persistence;

pub use error::{
    ConfigResult, ConfigurationError, PersistenceError, ensure_open_range, ensure_range,
};
pub use market_data::{MarketDataSource, MarketSeed};
pub use persistence::{InMemorySink, SnapshotSink};
