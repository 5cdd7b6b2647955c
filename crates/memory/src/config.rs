//! Memory Configuration

use jungle_ports::{ConfigResult, ConfigurationError, ensure_range};
use serde::{Deserialize, Serialize};

/// Curation parameters for a memory store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Maximum number of entries kept after curation
    pub capacity: usize,

    /// Per-tick multiplier applied to importance as entries age, in (0, 1]
    pub recency_decay: f64,

    /// Ticks an entry survives before expiring (None = until evicted)
    pub ttl_ticks: Option<u64>,

    /// Importance of a miss before recency decay (hits use their juice)
    pub miss_importance: f64,

    /// Number of latest hit/miss flags kept outside curation
    pub outcome_window: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            recency_decay: 0.97,
            ttl_ticks: Some(200),
            miss_importance: 1.0,
            outcome_window: 32,
        }
    }
}

impl MemoryConfig {
    /// Short memory: small and fast-forgetting
    pub fn goldfish() -> Self {
        Self {
            capacity: 8,
            recency_decay: 0.8,
            ttl_ticks: Some(20),
            miss_importance: 1.0,
            outcome_window: 8,
        }
    }

    /// Long memory: large, slow decay, nothing expires
    pub fn elephant() -> Self {
        Self {
            capacity: 512,
            recency_decay: 0.995,
            ttl_ticks: None,
            miss_importance: 0.5,
            outcome_window: 128,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_recency_decay(mut self, decay: f64) -> Self {
        self.recency_decay = decay;
        self
    }

    pub fn with_ttl_ticks(mut self, ttl: Option<u64>) -> Self {
        self.ttl_ticks = ttl;
        self
    }

    pub fn with_miss_importance(mut self, importance: f64) -> Self {
        self.miss_importance = importance;
        self
    }

    pub fn with_outcome_window(mut self, window: usize) -> Self {
        self.outcome_window = window;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.capacity".to_string(),
                value: 0.0,
                expected: ">= 1".to_string(),
            });
        }
        if self.recency_decay <= 0.0 {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.recency_decay".to_string(),
                value: self.recency_decay,
                expected: "(0, 1]".to_string(),
            });
        }
        ensure_range("memory.recency_decay", self.recency_decay, 0.0, 1.0)?;
        if self.ttl_ticks == Some(0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.ttl_ticks".to_string(),
                value: 0.0,
                expected: ">= 1".to_string(),
            });
        }
        if !(self.miss_importance.is_finite() && self.miss_importance >= 0.0) {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.miss_importance".to_string(),
                value: self.miss_importance,
                expected: ">= 0".to_string(),
            });
        }
        if self.outcome_window == 0 {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.outcome_window".to_string(),
                value: 0.0,
                expected: ">= 1".to_string(),
            });
        }
        Ok(())
    }
}
