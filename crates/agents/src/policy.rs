//! Shared decision machinery: memory bias, scoring and softmax sampling

use jungle_core::MarketState;
use jungle_memory::{MemoryStore, RecallContext};
use rand::RngCore;
use rand::distributions::{Distribution, WeightedIndex};

use crate::agent::Agent;
use crate::profile::AgentProfile;

/// Lower bound on temperature so the softmax never divides by zero
const MIN_TEMPERATURE: f64 = 1e-6;

/// Reward weight of a remembered hit
const HIT_REWARD: f64 = 1.0;

/// Penalty weight of a remembered miss
const MISS_PENALTY: f64 = -0.5;

/// A strike that passed the agent's filter, with its final score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredStrike {
    pub index: usize,
    pub base: f64,
    pub memory_bias: f64,
    pub score: f64,
}

/// Mean outcome of the memories most similar to strike `index`, weighted by proximity
///
/// Zero when the store is empty or recall is disabled.
pub fn memory_bias(
    market: &MarketState,
    memory: &MemoryStore,
    index: usize,
    context: RecallContext,
    recall_depth: usize,
) -> f64 {
    if recall_depth == 0 || memory.is_empty() || market.strike(index).is_none() {
        return 0.0;
    }

    let recalled = memory.retrieve(&context, recall_depth);
    if recalled.is_empty() {
        return 0.0;
    }

    let spacing = market.strike_spacing().max(f64::EPSILON);
    let total: f64 = recalled
        .iter()
        .map(|entry| {
            let proximity = 1.0 / (1.0 + (entry.strike - context.strike).abs() / spacing);
            let reward = if entry.hit { HIT_REWARD } else { MISS_PENALTY };
            proximity * reward
        })
        .sum();

    total / recalled.len() as f64
}

/// Score every strike that passes the agent's filter
pub fn score_candidates<A: Agent + ?Sized>(
    agent: &A,
    market: &MarketState,
    memory: &MemoryStore,
    profile: &AgentProfile,
) -> Vec<ScoredStrike> {
    market
        .strikes()
        .iter()
        .enumerate()
        .filter_map(|(index, strike)| {
            let base = agent.base_score(market, index, profile)?;
            let context = RecallContext::new(strike.price, agent.option_type(strike, profile));
            let bias = memory_bias(market, memory, index, context, profile.recall_depth);
            let score = base + profile.learning_rate * bias;
            score.is_finite().then_some(ScoredStrike {
                index,
                base,
                memory_bias: bias,
                score,
            })
        })
        .collect()
}

/// Softmax weights over scores at the given temperature
pub fn softmax_weights(scores: &[f64], temperature: f64) -> Vec<f64> {
    let temperature = temperature.max(MIN_TEMPERATURE);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .map(|s| ((s - max) / temperature).exp())
        .collect()
}

/// Sample a target strike index
pub fn choose_strike<A: Agent + ?Sized>(
    agent: &A,
    market: &MarketState,
    memory: &MemoryStore,
    profile: &AgentProfile,
    rng: &mut dyn RngCore,
) -> usize {
    let candidates = score_candidates(agent, market, memory, profile);
    if candidates.is_empty() {
        let fallback = market.nearest_strike_index(market.spot());
        log::debug!(
            "{}: no eligible strike, falling back to nearest spot strike #{}",
            agent.id(),
            fallback
        );
        return fallback;
    }

    let scores: Vec<f64> = candidates.iter().map(|c| c.score).collect();
    let weights = softmax_weights(&scores, profile.temperature);

    match WeightedIndex::new(&weights) {
        Ok(dist) => candidates[dist.sample(rng)].index,
        Err(e) => {
            log::warn!("{}: degenerate softmax weights ({}), using argmax", agent.id(), e);
            candidates
                .iter()
                .max_by(|a, b| a.score.total_cmp(&b.score).then(b.index.cmp(&a.index)))
                .map(|c| c.index)
                .unwrap_or_else(|| market.nearest_strike_index(market.spot()))
        }
    }
}
