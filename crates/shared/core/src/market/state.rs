//! Market State
//!
//! Spot price, strike ladder and per-strike gamma exposure.
//! Pure data plus update rules: no decision logic lives here.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use super::MarketDynamics;
use crate::entities::{GammaPoint, Strike};
use crate::error::{InvariantViolation, Result};

/// Spot never walks below this
const MIN_SPOT: f64 = 1e-6;

/// Market state for one simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    spot: f64,
    strikes: Vec<Strike>,
    tick: u64,
    /// Exposure as agents saw it at the start of the previous mutated tick
    previous_exposure: Vec<f64>,
    /// Tick at which `previous_exposure` was captured
    history_tick: Option<u64>,
    dynamics: MarketDynamics,
}

impl MarketState {
    /// Build a market, rejecting ladders that break the invariants
    pub fn new(spot: f64, strikes: Vec<Strike>, dynamics: MarketDynamics) -> Result<Self> {
        let previous_exposure = strikes.iter().map(|s| s.exposure).collect();
        let state = Self {
            spot,
            strikes,
            tick: 0,
            previous_exposure,
            history_tick: None,
            dynamics,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn strikes(&self) -> &[Strike] {
        &self.strikes
    }

    pub fn strike(&self, index: usize) -> Option<&Strike> {
        self.strikes.get(index)
    }

    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    pub fn dynamics(&self) -> &MarketDynamics {
        &self.dynamics
    }

    /// Ordered (strike, exposure) snapshot
    pub fn gamma_profile(&self) -> Vec<GammaPoint> {
        self.strikes
            .iter()
            .map(|s| GammaPoint {
                strike: s.price,
                exposure: s.exposure,
            })
            .collect()
    }

    pub fn total_exposure(&self) -> f64 {
        self.strikes.iter().map(|s| s.exposure).sum()
    }

    pub fn mean_exposure(&self) -> f64 {
        if self.strikes.is_empty() {
            return 0.0;
        }
        self.total_exposure() / self.strikes.len() as f64
    }

    pub fn max_exposure(&self) -> f64 {
        self.strikes.iter().map(|s| s.exposure).fold(0.0, f64::max)
    }

    /// Change in exposure since the previous tick's snapshot
    pub fn exposure_trend(&self, index: usize) -> f64 {
        match (self.strikes.get(index), self.previous_exposure.get(index)) {
            (Some(strike), Some(previous)) => strike.exposure - previous,
            _ => 0.0,
        }
    }

    /// Average gap between adjacent strikes (1.0 for a single-strike ladder)
    pub fn strike_spacing(&self) -> f64 {
        match (self.strikes.first(), self.strikes.last()) {
            (Some(first), Some(last)) if self.strikes.len() > 1 => {
                (last.price - first.price) / (self.strikes.len() - 1) as f64
            }
            _ => 1.0,
        }
    }

    /// Distance from the lowest to the highest strike
    pub fn ladder_span(&self) -> f64 {
        match (self.strikes.first(), self.strikes.last()) {
            (Some(first), Some(last)) => last.price - first.price,
            _ => 0.0,
        }
    }

    /// Index of the strike closest to `price` (lower strike wins ties)
    pub fn nearest_strike_index(&self, price: f64) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, strike) in self.strikes.iter().enumerate() {
            let distance = strike.distance_to(price);
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }

    /// Adjacent strikes of `index` that exist on the ladder
    pub fn neighbours(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(2);
        if index > 0 && index < self.strikes.len() {
            out.push(index - 1);
        }
        if index + 1 < self.strikes.len() {
            out.push(index + 1);
        }
        out
    }

    /// Check every market invariant
    pub fn validate(&self) -> Result<()> {
        if self.strikes.is_empty() {
            return Err(InvariantViolation::EmptyLadder);
        }
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(InvariantViolation::InvalidSpot(self.spot));
        }

        for (i, strike) in self.strikes.iter().enumerate() {
            if !strike.exposure.is_finite() {
                return Err(InvariantViolation::NonFiniteExposure {
                    strike: strike.price,
                });
            }
            if strike.exposure < 0.0 {
                return Err(InvariantViolation::NegativeExposure {
                    strike: strike.price,
                    exposure: strike.exposure,
                });
            }
            if i > 0 {
                let previous = self.strikes[i - 1].price;
                // NaN prices fail this comparison too
                if !(previous < strike.price) {
                    return Err(InvariantViolation::NonMonotonicStrikes {
                        index: i,
                        previous,
                        next: strike.price,
                    });
                }
            }
        }
        Ok(())
    }

    /// Passive step: decay every exposure and walk the spot price
    pub fn advance_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.remember_exposure();

        let decay = self.dynamics.decay_factor;
        for strike in &mut self.strikes {
            strike.exposure = (strike.exposure * decay).max(0.0);
        }

        let max_step = self.dynamics.max_spot_step;
        let step = Normal::new(0.0, self.dynamics.spot_volatility)
            .map(|normal| normal.sample(rng))
            .unwrap_or(0.0)
            .clamp(-max_step, max_step);
        self.spot = (self.spot * (1.0 + step)).max(MIN_SPOT);

        self.tick += 1;
    }

    /// Capture the exposure agents decided against, once per tick
    pub(super) fn remember_exposure(&mut self) {
        if self.history_tick == Some(self.tick) {
            return;
        }
        self.previous_exposure.clear();
        self.previous_exposure
            .extend(self.strikes.iter().map(|s| s.exposure));
        self.history_tick = Some(self.tick);
    }

    pub(super) fn strikes_mut(&mut self) -> &mut [Strike] {
        &mut self.strikes
    }
}
