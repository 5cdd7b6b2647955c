use serde::{Deserialize, Serialize};

use crate::values::{DteBand, OptionBias};

/// One rung of the strike ladder (a "tree" in the jungle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    /// Strike price
    pub price: f64,
    /// Which option type dominates dealer positioning here
    pub bias: OptionBias,
    /// Gamma exposure, always >= 0
    pub exposure: f64,
    /// Expiries that can reach this strike
    pub dte_band: DteBand,
}

impl Strike {
    pub fn new(price: f64, exposure: f64) -> Self {
        Self {
            price,
            bias: OptionBias::Neutral,
            exposure,
            dte_band: DteBand::any(),
        }
    }

    pub fn with_bias(mut self, bias: OptionBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_dte_band(mut self, band: DteBand) -> Self {
        self.dte_band = band;
        self
    }

    /// Absolute distance from a price
    pub fn distance_to(&self, price: f64) -> f64 {
        (self.price - price).abs()
    }
}

/// Read-only (strike, exposure) point handed to other components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaPoint {
    pub strike: f64,
    pub exposure: f64,
}
