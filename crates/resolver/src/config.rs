use jungle_ports::{ConfigResult, ConfigurationError, ensure_range};
use serde::{Deserialize, Serialize};

/// Tuning for the hit-probability and payout formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Accuracy lost at full aggressiveness, as a fraction
    pub accuracy_penalty: f64,

    /// Extra payout at full aggressiveness, as a fraction
    pub power_gain: f64,

    /// How much exposure at an aligned (or opposed) strike moves the hit chance
    pub exposure_weight: f64,

    /// Accuracy multiplier when the slingshot's option type differs from the action's
    pub option_mismatch_factor: f64,

    pub min_hit_probability: f64,
    pub max_hit_probability: f64,

    /// Juice per unit of exposure at power 1
    pub juice_scale: f64,

    /// Hit chance removed by a fully aggressive defender on the same strike
    pub defense_strength: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            accuracy_penalty: 0.5,
            power_gain: 1.0,
            exposure_weight: 0.5,
            option_mismatch_factor: 0.8,
            min_hit_probability: 0.02,
            max_hit_probability: 0.98,
            juice_scale: 0.1,
            defense_strength: 0.5,
        }
    }
}

impl ResolverConfig {
    /// Pure chance: no aggressiveness trade-off, no exposure effect, no defence
    pub fn neutral() -> Self {
        Self {
            accuracy_penalty: 0.0,
            power_gain: 0.0,
            exposure_weight: 0.0,
            option_mismatch_factor: 1.0,
            min_hit_probability: 0.0,
            max_hit_probability: 1.0,
            juice_scale: 0.1,
            defense_strength: 0.0,
        }
    }

    pub fn with_defense_strength(mut self, strength: f64) -> Self {
        self.defense_strength = strength;
        self
    }

    pub fn with_juice_scale(mut self, scale: f64) -> Self {
        self.juice_scale = scale;
        self
    }

    pub fn with_hit_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_hit_probability = min;
        self.max_hit_probability = max;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        ensure_range("resolver.accuracy_penalty", self.accuracy_penalty, 0.0, 1.0)?;
        ensure_range("resolver.power_gain", self.power_gain, 0.0, 10.0)?;
        ensure_range("resolver.exposure_weight", self.exposure_weight, 0.0, 1.0)?;
        ensure_range(
            "resolver.option_mismatch_factor",
            self.option_mismatch_factor,
            0.0,
            1.0,
        )?;
        ensure_range("resolver.min_hit_probability", self.min_hit_probability, 0.0, 1.0)?;
        ensure_range("resolver.max_hit_probability", self.max_hit_probability, 0.0, 1.0)?;
        if self.min_hit_probability > self.max_hit_probability {
            return Err(ConfigurationError::OutOfRange {
                parameter: "resolver.min_hit_probability".to_string(),
                value: self.min_hit_probability,
                expected: format!("<= max_hit_probability ({})", self.max_hit_probability),
            });
        }
        if !(self.juice_scale.is_finite() && self.juice_scale > 0.0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: "resolver.juice_scale".to_string(),
                value: self.juice_scale,
                expected: "> 0".to_string(),
            });
        }
        ensure_range("resolver.defense_strength", self.defense_strength, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_neutral_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
        assert!(ResolverConfig::neutral().validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = ResolverConfig::default().with_hit_bounds(0.9, 0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_juice_scale_rejected() {
        assert!(ResolverConfig::default().with_juice_scale(0.0).validate().is_err());
    }
}
