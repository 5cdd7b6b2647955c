mod dynamics;
mod reflexivity;
mod state;

pub use dynamics::MarketDynamics;
pub use reflexivity::ExposureShift;
pub use state::MarketState;
