//! Session Configuration
//!
//! Everything a session needs, loaded from JSON and validated before the
//! first tick. The embedded default lives in `default_session.json`.

use std::collections::HashSet;
use std::path::Path;

use jungle_agents::AgentProfile;
use jungle_core::{AgentKind, MarketDynamics};
use jungle_memory::MemoryConfig;
use jungle_ports::{ConfigResult, ConfigurationError, ensure_open_range, ensure_range};
use jungle_resolver::{ResolverConfig, SlingshotConfig};
use serde::{Deserialize, Serialize};

use crate::market_data::MarketSetup;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Random seed for determinism; drawn from entropy when absent
    pub seed: Option<u64>,

    /// Trial budget; the session reports `Finished` once reached
    pub max_ticks: Option<u64>,

    /// Number of top memories included in render snapshots
    pub render_top_k: usize,

    pub market: MarketSetup,
    pub dynamics: MarketDynamics,
    pub memory: MemoryConfig,
    pub resolver: ResolverConfig,

    pub slingshots: Vec<SlingshotConfig>,
    /// Slingshot the retail crowd starts with
    pub default_slingshot: String,
    /// Slingshot the market maker starts with (defaults to `default_slingshot`)
    pub market_maker_slingshot: Option<String>,

    pub retail_profiles: Vec<AgentProfile>,
    pub market_maker_profiles: Vec<AgentProfile>,
    pub retail_profile: String,
    pub market_maker_profile: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: None,
            render_top_k: 5,
            market: MarketSetup::default(),
            dynamics: MarketDynamics::default(),
            memory: MemoryConfig::default(),
            resolver: ResolverConfig::default(),
            slingshots: vec![
                SlingshotConfig::weekly_call(),
                SlingshotConfig::monthly_put(),
                SlingshotConfig::zero_dte_call(),
            ],
            default_slingshot: "weekly_call".to_string(),
            market_maker_slingshot: Some("monthly_put".to_string()),
            retail_profiles: vec![AgentProfile::retail_default(), AgentProfile::retail_degen()],
            market_maker_profiles: vec![
                AgentProfile::market_maker_default(),
                AgentProfile::market_maker_fortress(),
            ],
            retail_profile: "retail_default".to_string(),
            market_maker_profile: "market_maker_default".to_string(),
        }
    }
}

/// Load session configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> ConfigResult<SessionConfig> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> ConfigResult<SessionConfig> {
    let config: SessionConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> ConfigResult<SessionConfig> {
    let default_config = include_str!("default_session.json");
    load_config_from_str(default_config)
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn with_market(mut self, market: MarketSetup) -> Self {
        self.market = market;
        self
    }

    pub fn with_dynamics(mut self, dynamics: MarketDynamics) -> Self {
        self.dynamics = dynamics;
        self
    }

    pub fn with_memory(mut self, memory: MemoryConfig) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Get a slingshot by name
    pub fn slingshot(&self, name: &str) -> ConfigResult<&SlingshotConfig> {
        self.slingshots
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigurationError::UnknownSlingshot(name.to_string()))
    }

    /// Name of the slingshot an agent starts with
    pub fn starting_slingshot(&self, kind: AgentKind) -> &str {
        match kind {
            AgentKind::Retail => &self.default_slingshot,
            AgentKind::MarketMaker => self
                .market_maker_slingshot
                .as_deref()
                .unwrap_or(&self.default_slingshot),
        }
    }

    pub fn profiles(&self, kind: AgentKind) -> &[AgentProfile] {
        match kind {
            AgentKind::Retail => &self.retail_profiles,
            AgentKind::MarketMaker => &self.market_maker_profiles,
        }
    }

    /// Name of the profile an agent starts with
    pub fn starting_profile(&self, kind: AgentKind) -> &str {
        match kind {
            AgentKind::Retail => &self.retail_profile,
            AgentKind::MarketMaker => &self.market_maker_profile,
        }
    }

    /// Get a profile registered for `kind`
    ///
    /// A name registered only for the other agent is reported as a kind mismatch.
    pub fn profile(&self, kind: AgentKind, name: &str) -> ConfigResult<&AgentProfile> {
        if let Some(profile) = self.profiles(kind).iter().find(|p| p.name == name) {
            return Ok(profile);
        }
        if self.profiles(kind.opponent()).iter().any(|p| p.name == name) {
            return Err(ConfigurationError::ProfileKindMismatch {
                name: name.to_string(),
                registered: kind.opponent(),
                requested: kind,
            });
        }
        Err(ConfigurationError::UnknownProfile {
            kind,
            name: name.to_string(),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_ticks == Some(0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: "max_ticks".to_string(),
                value: 0.0,
                expected: ">= 1".to_string(),
            });
        }

        validate_dynamics(&self.dynamics)?;
        self.memory.validate()?;
        self.resolver.validate()?;

        if self.slingshots.is_empty() {
            return Err(ConfigurationError::MissingParameter("slingshots".to_string()));
        }
        let mut names = HashSet::new();
        for slingshot in &self.slingshots {
            slingshot.validate()?;
            if !names.insert(slingshot.name.as_str()) {
                return Err(ConfigurationError::DuplicateName(format!(
                    "slingshot {}",
                    slingshot.name
                )));
            }
        }

        for kind in [AgentKind::Retail, AgentKind::MarketMaker] {
            if self.profiles(kind).is_empty() {
                return Err(ConfigurationError::MissingParameter(format!(
                    "{}_profiles",
                    kind
                )));
            }
            let mut names = HashSet::new();
            for profile in self.profiles(kind) {
                profile.validate()?;
                if profile.fomo_window > self.memory.outcome_window {
                    return Err(ConfigurationError::OutOfRange {
                        parameter: format!("{}.fomo_window", profile.name),
                        value: profile.fomo_window as f64,
                        expected: format!("<= memory.outcome_window ({})", self.memory.outcome_window),
                    });
                }
                if !names.insert(profile.name.as_str()) {
                    return Err(ConfigurationError::DuplicateName(format!(
                        "{} profile {}",
                        kind, profile.name
                    )));
                }
            }
            self.profile(kind, self.starting_profile(kind))?;
            self.slingshot(self.starting_slingshot(kind))?;
        }

        Ok(())
    }
}

/// Range checks for the market dynamics
pub fn validate_dynamics(dynamics: &MarketDynamics) -> ConfigResult<()> {
    ensure_open_range("dynamics.decay_factor", dynamics.decay_factor, 0.0, 1.0)?;
    ensure_range("dynamics.spot_volatility", dynamics.spot_volatility, 0.0, 1.0)?;
    ensure_range("dynamics.max_spot_step", dynamics.max_spot_step, 0.0, 0.5)?;
    ensure_range("dynamics.reduction_rate", dynamics.reduction_rate, 0.0, 100.0)?;
    ensure_range("dynamics.spillover_fraction", dynamics.spillover_fraction, 0.0, 1.0)?;
    ensure_range("dynamics.miss_reinforcement", dynamics.miss_reinforcement, 0.0, 1.0)
}
