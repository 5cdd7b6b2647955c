//! Reflexive feedback loop: outcome → market update → memory

use jungle_core::{ExposureShift, MarketState, ProjectileOutcome, error::Result};
use jungle_memory::MemoryStore;

/// Fold one outcome into the market and into the acting agent's memory
///
/// Every outcome produces exactly one market update and one memory entry.
/// The entry is stamped with the tick the shot was fired on.
pub fn close_loop(
    market: &mut MarketState,
    memory: &mut MemoryStore,
    outcome: &ProjectileOutcome,
) -> Result<ExposureShift> {
    let shift = market.apply_outcome(outcome)?;
    memory.record_outcome(outcome, market.tick());

    log::debug!(
        "tick {} {} strike #{}: hit={} juice={:.3} removed={:.3} spilled={:.3}",
        market.tick(),
        outcome.agent_kind(),
        outcome.strike_index(),
        outcome.hit,
        outcome.juice,
        shift.removed,
        shift.redistributed
    );

    Ok(shift)
}
