use jungle_core::AgentKind;
use thiserror::Error;

/// Malformed or missing configuration, detected at the load boundary
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Parameter {parameter} = {value} out of range (expected {expected})")]
    OutOfRange {
        parameter: String,
        value: f64,
        expected: String,
    },

    #[error("Unknown {kind} profile: {name}")]
    UnknownProfile { kind: AgentKind, name: String },

    #[error("Unknown slingshot: {0}")]
    UnknownSlingshot(String),

    #[error("Profile {name} is registered for {registered}, not {requested}")]
    ProfileKindMismatch {
        name: String,
        registered: AgentKind,
        requested: AgentKind,
    },

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Invalid market data: {0}")]
    InvalidMarketData(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;

/// Check that `value` lies in `[min, max]`
pub fn ensure_range(parameter: &str, value: f64, min: f64, max: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= min && value <= max {
        return Ok(());
    }
    Err(ConfigurationError::OutOfRange {
        parameter: parameter.to_string(),
        value,
        expected: format!("[{}, {}]", min, max),
    })
}

/// Check that `value` lies in the open interval `(min, max)`
pub fn ensure_open_range(parameter: &str, value: f64, min: f64, max: f64) -> ConfigResult<()> {
    if value.is_finite() && value > min && value < max {
        return Ok(());
    }
    Err(ConfigurationError::OutOfRange {
        parameter: parameter.to_string(),
        value,
        expected: format!("({}, {})", min, max),
    })
}

/// Snapshot could not be handed to the save manager
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}
