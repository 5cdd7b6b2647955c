use serde::{Deserialize, Serialize};

/// Unique identifier for an agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two adversaries in the jungle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Retail crowd chasing gamma momentum
    Retail,
    /// Dealer defending the strikes where it is most exposed
    MarketMaker,
}

impl AgentKind {
    /// Returns the adversary
    pub fn opponent(&self) -> Self {
        match self {
            AgentKind::Retail => AgentKind::MarketMaker,
            AgentKind::MarketMaker => AgentKind::Retail,
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Retail => write!(f, "retail"),
            AgentKind::MarketMaker => write!(f, "market_maker"),
        }
    }
}

/// Option type an action intends to push: Call or Put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Returns the opposite option type
    pub fn opposite(&self) -> Self {
        match self {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => write!(f, "C"),
            OptionType::Put => write!(f, "P"),
        }
    }
}

/// Which side of the book dominates dealer positioning at a strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionBias {
    CallLean,
    PutLean,
    #[default]
    Neutral,
}

impl OptionBias {
    /// +1 when the option type leans the same way, -1 when it opposes, 0 for neutral strikes
    pub fn alignment(&self, option_type: OptionType) -> f64 {
        match (self, option_type) {
            (OptionBias::Neutral, _) => 0.0,
            (OptionBias::CallLean, OptionType::Call) | (OptionBias::PutLean, OptionType::Put) => {
                1.0
            }
            _ => -1.0,
        }
    }

    /// The option type this lean favours, if any
    pub fn option_type(&self) -> Option<OptionType> {
        match self {
            OptionBias::CallLean => Some(OptionType::Call),
            OptionBias::PutLean => Some(OptionType::Put),
            OptionBias::Neutral => None,
        }
    }
}

/// Inclusive days-to-expiry band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DteBand {
    pub min_days: u32,
    pub max_days: u32,
}

impl DteBand {
    pub fn new(min_days: u32, max_days: u32) -> Self {
        Self { min_days, max_days }
    }

    /// Band accepting any expiry
    pub fn any() -> Self {
        Self::new(0, u32::MAX)
    }

    pub fn contains(&self, dte: u32) -> bool {
        self.min_days <= dte && dte <= self.max_days
    }
}

impl Default for DteBand {
    fn default() -> Self {
        Self::any()
    }
}

impl std::fmt::Display for DteBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}d", self.min_days, self.max_days)
    }
}
