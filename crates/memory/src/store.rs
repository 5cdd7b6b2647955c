//! Memory Store
//!
//! Bounded per-agent memory. Every `record` ends with a synchronous curation
//! pass, so `len() <= capacity()` holds between any two calls.
//!
//! Curation may drop an entry right after it is recorded, so hit/miss flags
//! also go into a fixed-size outcome window that curation never touches.
//! Recent hit rate and streaks are read from that window.

use std::cmp::Ordering;
use std::collections::VecDeque;

use jungle_core::ProjectileOutcome;
use jungle_ports::{ConfigResult, ConfigurationError};
use serde::{Deserialize, Serialize};

use crate::config::MemoryConfig;
use crate::entry::{MemoryEntry, RecallContext};

/// Aggregate view of a store ("insights")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySummary {
    pub len: usize,
    pub capacity: usize,
    pub hits: usize,
    pub misses: usize,
    pub total_juice: f64,
    pub hit_rate: f64,
    /// Hit rate over the outcome window
    pub recent_hit_rate: f64,
    pub hit_streak: usize,
    /// Every outcome ever recorded, curated or not
    pub recorded: u64,
    /// Most important entries, highest first
    pub top: Vec<MemoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    config: MemoryConfig,
    /// Insertion (seq) order, oldest first
    entries: Vec<MemoryEntry>,
    /// Latest hit flags, oldest first, at most `outcome_window` long
    #[serde(default)]
    outcomes: VecDeque<bool>,
    next_seq: u64,
    latest_tick: u64,
}

impl MemoryStore {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            outcomes: VecDeque::new(),
            next_seq: 0,
            latest_tick: 0,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// Number of outcomes recorded since creation
    pub fn recorded(&self) -> u64 {
        self.next_seq
    }

    /// Highest tick ever recorded
    pub fn latest_tick(&self) -> u64 {
        self.latest_tick
    }

    /// Store an entry, then curate
    ///
    /// The store assigns the entry's `seq`; the assigned value is returned.
    /// The new entry itself may be evicted if it is the least important one.
    pub fn record(&mut self, mut entry: MemoryEntry) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        entry.seq = seq;
        self.latest_tick = self.latest_tick.max(entry.tick);

        self.outcomes.push_back(entry.hit);
        while self.outcomes.len() > self.config.outcome_window {
            self.outcomes.pop_front();
        }
        self.entries.push(entry);

        self.curate();
        seq
    }

    /// Convenience wrapper: build the entry from an outcome using the configured TTL
    pub fn record_outcome(&mut self, outcome: &ProjectileOutcome, tick: u64) -> u64 {
        let entry = MemoryEntry::from_outcome(outcome, tick, self.config.ttl_ticks);
        self.record(entry)
    }

    fn curate(&mut self) {
        let latest = self.latest_tick;

        let before = self.entries.len();
        self.entries.retain(|e| !e.is_expired(latest));
        let expired = before - self.entries.len();
        if expired > 0 {
            log::debug!("Memory: dropped {} expired entries at tick {}", expired, latest);
        }

        let decay = self.config.recency_decay;
        let miss_importance = self.config.miss_importance;
        for entry in &mut self.entries {
            let age = latest.saturating_sub(entry.tick) as f64;
            let base = if entry.hit {
                entry.juice.abs()
            } else {
                miss_importance
            };
            entry.importance = base * decay.powf(age);
        }

        while self.entries.len() > self.config.capacity {
            let victim = self
                .entries
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| eviction_order(a, b))
                .map(|(i, _)| i);

            match victim {
                Some(index) => {
                    let evicted = self.entries.remove(index);
                    log::debug!(
                        "Memory: evicted seq={} tick={} importance={:.4}",
                        evicted.seq,
                        evicted.tick,
                        evicted.importance
                    );
                }
                None => break,
            }
        }
    }

    /// Up to `k` entries most similar to `context`
    ///
    /// Ordered by strike distance, then option-type match, then newest tick,
    /// then highest seq. The order is total, so retrieval is reproducible.
    pub fn retrieve(&self, context: &RecallContext, k: usize) -> Vec<&MemoryEntry> {
        let mut ranked: Vec<&MemoryEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            let da = (a.strike - context.strike).abs();
            let db = (b.strike - context.strike).abs();
            da.total_cmp(&db)
                .then_with(|| {
                    let ma = a.option_type != context.option_type;
                    let mb = b.option_type != context.option_type;
                    ma.cmp(&mb)
                })
                .then_with(|| b.tick.cmp(&a.tick))
                .then_with(|| b.seq.cmp(&a.seq))
        });
        ranked.truncate(k);
        ranked
    }

    /// Newest `n` entries, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.iter().rev().take(n)
    }

    /// Hit rate over the newest `n` recorded outcomes (0 when there are none)
    ///
    /// Read from the outcome window, so `n` is capped at its size.
    pub fn recent_hit_rate(&self, n: usize) -> f64 {
        let (count, hits) = self
            .outcomes
            .iter()
            .rev()
            .take(n)
            .fold((0usize, 0usize), |(c, h), &hit| (c + 1, h + usize::from(hit)));
        if count == 0 {
            0.0
        } else {
            hits as f64 / count as f64
        }
    }

    /// Consecutive hits counting back from the newest outcome (at most the window size)
    pub fn hit_streak(&self) -> usize {
        self.outcomes.iter().rev().take_while(|&&hit| hit).count()
    }

    /// Latest hit flags, oldest first
    pub fn outcome_window(&self) -> impl Iterator<Item = bool> + '_ {
        self.outcomes.iter().copied()
    }

    /// Check a store loaded from outside (e.g. a saved snapshot)
    pub fn validate(&self) -> ConfigResult<()> {
        self.config.validate()?;
        if self.entries.len() > self.config.capacity {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.entries".to_string(),
                value: self.entries.len() as f64,
                expected: format!("<= capacity ({})", self.config.capacity),
            });
        }
        if self.outcomes.len() > self.config.outcome_window {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.outcomes".to_string(),
                value: self.outcomes.len() as f64,
                expected: format!("<= outcome_window ({})", self.config.outcome_window),
            });
        }
        if let Some(entry) = self.entries.iter().find(|e| e.seq >= self.next_seq) {
            return Err(ConfigurationError::OutOfRange {
                parameter: "memory.entries.seq".to_string(),
                value: entry.seq as f64,
                expected: format!("< next seq ({})", self.next_seq),
            });
        }
        Ok(())
    }

    /// Up to `k` entries by importance, highest first
    pub fn top_by_importance(&self, k: usize) -> Vec<&MemoryEntry> {
        let mut ranked: Vec<&MemoryEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| eviction_order(b, a));
        ranked.truncate(k);
        ranked
    }

    pub fn summary(&self, k: usize) -> MemorySummary {
        let hits = self.entries.iter().filter(|e| e.hit).count();
        let len = self.entries.len();
        MemorySummary {
            len,
            capacity: self.config.capacity,
            hits,
            misses: len - hits,
            total_juice: self.entries.iter().map(|e| e.juice).sum(),
            hit_rate: if len == 0 { 0.0 } else { hits as f64 / len as f64 },
            recent_hit_rate: self.recent_hit_rate(self.config.outcome_window),
            hit_streak: self.hit_streak(),
            recorded: self.next_seq,
            top: self.top_by_importance(k).into_iter().cloned().collect(),
        }
    }

    /// Forget everything; sequence numbers keep increasing
    pub fn clear(&mut self) {
        self.entries.clear();
        self.outcomes.clear();
        self.latest_tick = 0;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

/// Lowest importance first, then oldest tick, then lowest seq
fn eviction_order(a: &MemoryEntry, b: &MemoryEntry) -> Ordering {
    a.importance
        .total_cmp(&b.importance)
        .then_with(|| a.tick.cmp(&b.tick))
        .then_with(|| a.seq.cmp(&b.seq))
}
