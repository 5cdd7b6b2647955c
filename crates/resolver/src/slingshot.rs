//! Slingshots
//!
//! A slingshot is the option contract a shot is fired with: how hard it
//! pushes, how precisely, and which expiry it carries.

use jungle_core::OptionType;
use jungle_ports::{ConfigResult, ConfigurationError, ensure_range};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlingshotConfig {
    pub name: String,
    /// Payout multiplier, > 0
    pub power: f64,
    /// Base hit chance before aggressiveness and exposure, [0, 1]
    pub accuracy: f64,
    /// Days to expiry; must fall inside the target strike's band
    pub dte: u32,
    pub option_type: OptionType,
}

impl SlingshotConfig {
    pub fn new(
        name: impl Into<String>,
        power: f64,
        accuracy: f64,
        dte: u32,
        option_type: OptionType,
    ) -> Self {
        Self {
            name: name.into(),
            power,
            accuracy,
            dte,
            option_type,
        }
    }

    /// Short-dated call: balanced
    pub fn weekly_call() -> Self {
        Self::new("weekly_call", 1.0, 0.7, 7, OptionType::Call)
    }

    /// Monthly put: weaker but steadier
    pub fn monthly_put() -> Self {
        Self::new("monthly_put", 0.8, 0.8, 30, OptionType::Put)
    }

    /// Same-day lottery ticket: huge power, poor aim
    pub fn zero_dte_call() -> Self {
        Self::new("zero_dte_call", 2.0, 0.4, 0, OptionType::Call)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::MissingParameter(
                "slingshot.name".to_string(),
            ));
        }
        if !(self.power.is_finite() && self.power > 0.0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: format!("{}.power", self.name),
                value: self.power,
                expected: "> 0".to_string(),
            });
        }
        ensure_range(&format!("{}.accuracy", self.name), self.accuracy, 0.0, 1.0)
    }
}

impl Default for SlingshotConfig {
    fn default() -> Self {
        Self::weekly_call()
    }
}
