//! Market Data Sources
//!
//! Implementations of the market data port: a synthetic ladder generated
//! around spot, and static gamma values handed over by an external loader.

use jungle_core::{DteBand, GammaPoint, OptionBias, Strike};
use jungle_ports::{ConfigResult, ConfigurationError, MarketDataSource, MarketSeed};
use serde::{Deserialize, Serialize};

/// Ladders narrower than this many strikes per side are widened
const MIN_HALF_WIDTH: u32 = 10;
/// Widest ladder a synthetic source will generate, per side
const MAX_HALF_WIDTH: u32 = 500;

/// How synthetic exposure falls off away from spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LadderShape {
    /// `peak × decay^steps`: gamma concentrated at the money
    Exponential,
    /// `peak × (0.2 + 0.02 × steps)`: flat-ish wings
    Linear,
}

/// Evenly spaced strikes around spot with synthetic exposure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticLadder {
    pub spot: f64,
    /// Strikes on each side of the at-the-money strike
    pub half_width: u32,
    /// Price gap between adjacent strikes
    pub step: f64,
    /// Exposure scale at the money
    pub peak_exposure: f64,
    /// Per-step falloff for the exponential shape, in (0, 1]
    pub decay: f64,
    pub shape: LadderShape,
    /// Minimum DTE grows by this many days per step away from spot
    pub days_per_step: f64,
    /// Longest expiry any strike accepts
    pub max_dte: u32,
}

impl Default for SyntheticLadder {
    fn default() -> Self {
        Self {
            spot: 500.0,
            half_width: 15,
            step: 1.0,
            peak_exposure: 100.0,
            decay: 0.9,
            shape: LadderShape::Exponential,
            days_per_step: 0.5,
            max_dte: 365,
        }
    }
}

impl SyntheticLadder {
    pub fn around(spot: f64) -> Self {
        Self {
            spot,
            ..Default::default()
        }
    }

    pub fn with_half_width(mut self, half_width: u32) -> Self {
        self.half_width = half_width;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_shape(mut self, shape: LadderShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_days_per_step(mut self, days: f64) -> Self {
        self.days_per_step = days;
        self
    }

    fn check(&self) -> ConfigResult<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigurationError::OutOfRange {
                    parameter: format!("market.{}", name),
                    value,
                    expected: "> 0".to_string(),
                })
            }
        };
        if self.half_width > MAX_HALF_WIDTH {
            return Err(ConfigurationError::OutOfRange {
                parameter: "market.half_width".to_string(),
                value: self.half_width as f64,
                expected: format!("<= {}", MAX_HALF_WIDTH),
            });
        }
        positive("spot", self.spot)?;
        positive("step", self.step)?;
        positive("peak_exposure", self.peak_exposure)?;
        jungle_ports::ensure_range("market.decay", self.decay, f64::MIN_POSITIVE, 1.0)?;
        jungle_ports::ensure_range("market.days_per_step", self.days_per_step, 0.0, 365.0)
    }
}

impl MarketDataSource for SyntheticLadder {
    fn load(&self) -> ConfigResult<MarketSeed> {
        self.check()?;

        let half_width = self.half_width.max(MIN_HALF_WIDTH);
        let atm = (self.spot / self.step).round() * self.step;

        let strikes: Vec<Strike> = (-(half_width as i64)..=half_width as i64)
            .map(|offset| {
                let price = atm + offset as f64 * self.step;
                let steps = (price - self.spot).abs() / self.step;
                let exposure = match self.shape {
                    LadderShape::Exponential => self.peak_exposure * self.decay.powf(steps),
                    LadderShape::Linear => self.peak_exposure * (0.2 + 0.02 * steps),
                };
                let min_dte = (offset.unsigned_abs() as f64 * self.days_per_step).floor() as u32;

                Strike::new(price, exposure)
                    .with_bias(positional_bias(offset))
                    .with_dte_band(DteBand::new(min_dte.min(self.max_dte), self.max_dte))
            })
            .filter(|strike| strike.price > 0.0)
            .collect();

        log::info!(
            "Generated {} synthetic strikes around {} ({:?})",
            strikes.len(),
            self.spot,
            self.shape
        );

        Ok(MarketSeed {
            spot: self.spot,
            strikes,
        })
    }

    fn name(&self) -> &str {
        "SyntheticLadder"
    }
}

/// Real gamma values, normalised by their maximum and rescaled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMarketData {
    pub spot: f64,
    /// Raw (strike, gamma) pairs in any order
    pub gamma: Vec<GammaPoint>,
    /// Exposure assigned to the largest gamma value
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    100.0
}

impl StaticMarketData {
    pub fn new(spot: f64, gamma: Vec<GammaPoint>) -> Self {
        Self {
            spot,
            gamma,
            scale: default_scale(),
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl MarketDataSource for StaticMarketData {
    fn load(&self) -> ConfigResult<MarketSeed> {
        if self.gamma.is_empty() {
            return Err(ConfigurationError::InvalidMarketData(
                "no gamma values".to_string(),
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: "market.scale".to_string(),
                value: self.scale,
                expected: "> 0".to_string(),
            });
        }
        if let Some(bad) = self
            .gamma
            .iter()
            .find(|p| !p.exposure.is_finite() || p.exposure < 0.0 || !p.strike.is_finite())
        {
            return Err(ConfigurationError::InvalidMarketData(format!(
                "strike {} has gamma {}",
                bad.strike, bad.exposure
            )));
        }

        let max_gamma = self.gamma.iter().map(|p| p.exposure).fold(0.0, f64::max);
        if max_gamma <= 0.0 {
            return Err(ConfigurationError::InvalidMarketData(
                "all gamma values are zero".to_string(),
            ));
        }

        let mut points = self.gamma.clone();
        points.sort_by(|a, b| a.strike.total_cmp(&b.strike));
        if let Some(pair) = points.windows(2).find(|w| w[0].strike == w[1].strike) {
            return Err(ConfigurationError::InvalidMarketData(format!(
                "duplicate strike {}",
                pair[0].strike
            )));
        }

        let atm = points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.strike - self.spot)
                    .abs()
                    .total_cmp(&(b.strike - self.spot).abs())
            })
            .map(|(i, _)| i as i64)
            .unwrap_or(0);

        let strikes = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Strike::new(p.strike, p.exposure / max_gamma * self.scale)
                    .with_bias(positional_bias(i as i64 - atm))
            })
            .collect();

        log::info!(
            "Loaded {} strikes, gamma normalised by max {}",
            points.len(),
            max_gamma
        );

        Ok(MarketSeed {
            spot: self.spot,
            strikes,
        })
    }

    fn name(&self) -> &str {
        "StaticMarketData"
    }
}

/// Calls dominate above the money, puts below
fn positional_bias(offset: i64) -> OptionBias {
    match offset {
        o if o > 0 => OptionBias::CallLean,
        o if o < 0 => OptionBias::PutLean,
        _ => OptionBias::Neutral,
    }
}

/// Market source selected in the session config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MarketSetup {
    Synthetic(SyntheticLadder),
    Static(StaticMarketData),
}

impl Default for MarketSetup {
    fn default() -> Self {
        MarketSetup::Synthetic(SyntheticLadder::default())
    }
}

impl MarketSetup {
    pub fn source(&self) -> &dyn MarketDataSource {
        match self {
            MarketSetup::Synthetic(ladder) => ladder,
            MarketSetup::Static(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_synthetic_ladder_shape() {
        let seed = SyntheticLadder::around(500.0).load().unwrap();

        assert_eq!(seed.strikes.len(), 31);
        assert_eq!(seed.strikes.first().unwrap().price, 485.0);
        assert_eq!(seed.strikes.last().unwrap().price, 515.0);

        let atm = &seed.strikes[15];
        assert_eq!(atm.price, 500.0);
        assert_eq!(atm.bias, OptionBias::Neutral);
        assert_relative_eq!(atm.exposure, 100.0);
        assert_relative_eq!(seed.strikes[16].exposure, 90.0);
        assert_eq!(seed.strikes[16].bias, OptionBias::CallLean);
        assert_eq!(seed.strikes[14].bias, OptionBias::PutLean);
    }

    #[test]
    fn test_synthetic_dte_bands_widen_with_distance() {
        let seed = SyntheticLadder::around(500.0).load().unwrap();

        assert!(seed.strikes[15].dte_band.contains(0));
        assert!(seed.strikes[16].dte_band.contains(0));
        assert!(!seed.strikes[0].dte_band.contains(0));
        assert!(seed.strikes[0].dte_band.contains(7));
    }

    #[test]
    fn test_narrow_ladder_is_widened() {
        let seed = SyntheticLadder::around(500.0)
            .with_half_width(2)
            .load()
            .unwrap();
        assert_eq!(seed.strikes.len(), 21);
    }

    #[test]
    fn test_oversized_ladder_rejected() {
        let err = SyntheticLadder::around(500.0)
            .with_half_width(u32::MAX)
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::OutOfRange { parameter, .. } if parameter == "market.half_width"
        ));
        assert!(
            SyntheticLadder::around(500.0)
                .with_half_width(MAX_HALF_WIDTH)
                .load()
                .is_ok()
        );
    }

    #[test]
    fn test_linear_shape_grows_in_the_wings() {
        let seed = SyntheticLadder::around(500.0)
            .with_shape(LadderShape::Linear)
            .load()
            .unwrap();
        assert_relative_eq!(seed.strikes[15].exposure, 20.0);
        assert!(seed.strikes[0].exposure > seed.strikes[15].exposure);
    }

    #[test]
    fn test_static_data_normalised_by_max() {
        let data = StaticMarketData::new(
            501.0,
            vec![
                GammaPoint { strike: 505.0, exposure: 2.0 },
                GammaPoint { strike: 495.0, exposure: 1.0 },
                GammaPoint { strike: 500.0, exposure: 4.0 },
            ],
        )
        .with_scale(50.0);

        let seed = data.load().unwrap();
        let prices: Vec<f64> = seed.strikes.iter().map(|s| s.price).collect();
        assert_eq!(prices, vec![495.0, 500.0, 505.0]);
        assert_relative_eq!(seed.strikes[0].exposure, 12.5);
        assert_relative_eq!(seed.strikes[1].exposure, 50.0);
        assert_relative_eq!(seed.strikes[2].exposure, 25.0);
        assert_eq!(seed.strikes[1].bias, OptionBias::Neutral);
    }

    #[test]
    fn test_static_data_rejects_bad_input() {
        let empty = StaticMarketData::new(500.0, vec![]);
        assert!(matches!(
            empty.load(),
            Err(ConfigurationError::InvalidMarketData(_))
        ));

        let negative = StaticMarketData::new(
            500.0,
            vec![GammaPoint { strike: 500.0, exposure: -1.0 }],
        );
        assert!(negative.load().is_err());

        let duplicate = StaticMarketData::new(
            500.0,
            vec![
                GammaPoint { strike: 500.0, exposure: 1.0 },
                GammaPoint { strike: 500.0, exposure: 2.0 },
            ],
        );
        assert!(duplicate.load().is_err());
    }

    #[test]
    fn test_setup_json_is_tagged() {
        let json = r#"{"source": "synthetic", "spot": 420.0, "half_width": 12}"#;
        let setup: MarketSetup = serde_json::from_str(json).unwrap();
        match &setup {
            MarketSetup::Synthetic(ladder) => {
                assert_eq!(ladder.spot, 420.0);
                assert_eq!(ladder.step, 1.0);
            }
            other => panic!("unexpected setup: {other:?}"),
        }
        assert_eq!(setup.source().name(), "SyntheticLadder");
    }
}
