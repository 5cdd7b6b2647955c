//! Agent Profiles
//!
//! Named behavioural parameter sets. A profile is immutable once loaded;
//! switching profile replaces it whole.

use jungle_core::OptionType;
use jungle_ports::{ConfigResult, ConfigurationError, ensure_range};
use serde::{Deserialize, Serialize};

/// Behavioural parameters for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProfile {
    /// Profile name used for lookup and switching
    pub name: String,

    /// Retail: how strongly upside strikes are preferred, [0, 1]
    pub optimism_bias: f64,

    /// Retail: recent hit rate above which the crowd piles in, [0, 1]
    pub fomo_threshold: f64,

    /// Retail: number of recent shots the FOMO check looks at
    pub fomo_window: usize,

    /// Retail: how far from spot the crowd is willing to reach, [0, 1] of the ladder span
    pub risk_tolerance: f64,

    /// Market maker: distance penalty and caution, [0, 1]
    pub risk_aversion: f64,

    /// Market maker: strikes further than this from spot are not defended
    pub defense_radius: f64,

    /// Weight of memory bias in the strike score
    pub learning_rate: f64,

    /// Softmax temperature; lower is greedier
    pub temperature: f64,

    /// Number of similar memories consulted per candidate strike
    pub recall_depth: usize,

    /// Option type the agent pushes when it has no other reason to choose
    pub preferred_option: OptionType,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self::retail_default()
    }
}

impl AgentProfile {
    pub fn retail_default() -> Self {
        Self {
            name: "retail_default".to_string(),
            optimism_bias: 0.6,
            fomo_threshold: 0.6,
            fomo_window: 5,
            risk_tolerance: 0.4,
            risk_aversion: 0.2,
            defense_radius: 10.0,
            learning_rate: 0.5,
            temperature: 0.5,
            recall_depth: 8,
            preferred_option: OptionType::Call,
        }
    }

    /// Reckless crowd: reaches far, herds early, fires hard
    pub fn retail_degen() -> Self {
        Self {
            name: "retail_degen".to_string(),
            optimism_bias: 0.9,
            fomo_threshold: 0.4,
            fomo_window: 3,
            risk_tolerance: 0.9,
            learning_rate: 0.8,
            temperature: 0.8,
            recall_depth: 4,
            ..Self::retail_default()
        }
    }

    pub fn market_maker_default() -> Self {
        Self {
            name: "market_maker_default".to_string(),
            optimism_bias: 0.0,
            fomo_threshold: 1.0,
            fomo_window: 5,
            risk_tolerance: 0.3,
            risk_aversion: 0.5,
            defense_radius: 10.0,
            learning_rate: 0.4,
            temperature: 0.3,
            recall_depth: 8,
            preferred_option: OptionType::Put,
        }
    }

    /// Cautious dealer: wide defence, low aggressiveness, near-greedy choice
    pub fn market_maker_fortress() -> Self {
        Self {
            name: "market_maker_fortress".to_string(),
            risk_aversion: 0.85,
            defense_radius: 20.0,
            temperature: 0.15,
            recall_depth: 12,
            ..Self::market_maker_default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_optimism_bias(mut self, bias: f64) -> Self {
        self.optimism_bias = bias;
        self
    }

    pub fn with_fomo(mut self, threshold: f64, window: usize) -> Self {
        self.fomo_threshold = threshold;
        self.fomo_window = window;
        self
    }

    pub fn with_risk_tolerance(mut self, tolerance: f64) -> Self {
        self.risk_tolerance = tolerance;
        self
    }

    pub fn with_risk_aversion(mut self, aversion: f64) -> Self {
        self.risk_aversion = aversion;
        self
    }

    pub fn with_defense_radius(mut self, radius: f64) -> Self {
        self.defense_radius = radius;
        self
    }

    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_recall_depth(mut self, depth: usize) -> Self {
        self.recall_depth = depth;
        self
    }

    pub fn with_preferred_option(mut self, option_type: OptionType) -> Self {
        self.preferred_option = option_type;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::MissingParameter("profile.name".to_string()));
        }

        ensure_range(&self.param("optimism_bias"), self.optimism_bias, 0.0, 1.0)?;
        ensure_range(&self.param("fomo_threshold"), self.fomo_threshold, 0.0, 1.0)?;
        ensure_range(&self.param("risk_tolerance"), self.risk_tolerance, 0.0, 1.0)?;
        ensure_range(&self.param("risk_aversion"), self.risk_aversion, 0.0, 1.0)?;
        ensure_range(&self.param("learning_rate"), self.learning_rate, 0.0, 10.0)?;

        if self.fomo_window == 0 {
            return Err(ConfigurationError::OutOfRange {
                parameter: self.param("fomo_window"),
                value: 0.0,
                expected: ">= 1".to_string(),
            });
        }
        if !(self.defense_radius.is_finite() && self.defense_radius > 0.0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: self.param("defense_radius"),
                value: self.defense_radius,
                expected: "> 0".to_string(),
            });
        }
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: self.param("temperature"),
                value: self.temperature,
                expected: "> 0".to_string(),
            });
        }
        Ok(())
    }

    fn param(&self, field: &str) -> String {
        format!("{}.{}", self.name, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_valid() {
        for profile in [
            AgentProfile::retail_default(),
            AgentProfile::retail_degen(),
            AgentProfile::market_maker_default(),
            AgentProfile::market_maker_fortress(),
        ] {
            assert!(profile.validate().is_ok(), "{} should be valid", profile.name);
        }
    }

    #[test]
    fn test_out_of_range_reports_parameter() {
        let err = AgentProfile::retail_default()
            .with_optimism_bias(1.5)
            .validate()
            .unwrap_err();

        match err {
            ConfigurationError::OutOfRange { parameter, value, .. } => {
                assert_eq!(parameter, "retail_default.optimism_bias");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_degenerate_values() {
        assert!(AgentProfile::default().with_temperature(0.0).validate().is_err());
        assert!(AgentProfile::default().with_fomo(0.5, 0).validate().is_err());
        assert!(AgentProfile::default().with_defense_radius(-1.0).validate().is_err());
        assert!(AgentProfile::default().with_name("  ").validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let profile: AgentProfile =
            serde_json::from_str(r#"{"name": "yolo", "optimism_bias": 1.0}"#).unwrap();

        assert_eq!(profile.name, "yolo");
        assert_eq!(profile.optimism_bias, 1.0);
        assert_eq!(profile.fomo_window, AgentProfile::retail_default().fomo_window);
    }
}
