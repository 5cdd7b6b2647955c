//! Reflexive update of the gamma surface
//!
//! A hit knocks exposure off the target strike and dealers re-hedge part of it
//! onto the adjacent strikes. A miss reinforces the status quo.

use serde::{Deserialize, Serialize};

use super::MarketState;
use crate::entities::ProjectileOutcome;
use crate::error::{InvariantViolation, Result};

/// How one outcome reshaped the surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExposureShift {
    pub strike_index: usize,
    /// Exposure taken off the target strike
    pub removed: f64,
    /// Part of `removed` moved onto neighbours
    pub redistributed: f64,
    /// Exposure added to the target by a miss
    pub reinforced: f64,
}

impl ExposureShift {
    /// Net change in total exposure caused by this shift
    pub fn net_change(&self) -> f64 {
        self.reinforced + self.redistributed - self.removed
    }
}

impl MarketState {
    /// Fold a resolved outcome back into the surface
    ///
    /// The update is staged on a copy; on error the market is left as it was.
    pub fn apply_outcome(&mut self, outcome: &ProjectileOutcome) -> Result<ExposureShift> {
        let index = outcome.strike_index();
        if index >= self.len() {
            return Err(InvariantViolation::StrikeOutOfRange {
                index,
                len: self.len(),
            });
        }

        let mut staged = self.clone();
        staged.remember_exposure();

        let shift = if outcome.hit {
            staged.knock_down(index, outcome.juice)
        } else {
            staged.reinforce(index)
        };

        staged.validate()?;
        *self = staged;
        Ok(shift)
    }

    fn knock_down(&mut self, index: usize, juice: f64) -> ExposureShift {
        let reduction_rate = self.dynamics().reduction_rate;
        let spillover_fraction = self.dynamics().spillover_fraction;
        let neighbours = self.neighbours(index);
        let strikes = self.strikes_mut();

        let target = &mut strikes[index];
        let removed = (reduction_rate * juice.max(0.0)).min(target.exposure).max(0.0);
        target.exposure = (target.exposure - removed).max(0.0);

        let mut redistributed = 0.0;
        if !neighbours.is_empty() {
            let spill = removed * spillover_fraction;
            let share = spill / neighbours.len() as f64;
            for n in neighbours {
                strikes[n].exposure += share;
            }
            redistributed = spill;
        }

        ExposureShift {
            strike_index: index,
            removed,
            redistributed,
            reinforced: 0.0,
        }
    }

    fn reinforce(&mut self, index: usize) -> ExposureShift {
        let reinforcement = self.dynamics().miss_reinforcement.max(0.0);
        let target = &mut self.strikes_mut()[index];
        let reinforced = target.exposure * reinforcement;
        target.exposure += reinforced;

        ExposureShift {
            strike_index: index,
            removed: 0.0,
            redistributed: 0.0,
            reinforced,
        }
    }
}
