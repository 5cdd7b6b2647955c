//! Decision policy behaviour for both agents

use approx::assert_relative_eq;
use jungle_agents::{Agent, AgentProfile, MarketMakerAgent, RetailAgent, build_agent, policy};
use jungle_core::{AgentKind, MarketDynamics, MarketState, OptionBias, OptionType, Strike};
use jungle_memory::{MemoryConfig, MemoryEntry, MemoryStore};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn ladder(spot: f64) -> MarketState {
    let strikes = vec![
        Strike::new(490.0, 2.0).with_bias(OptionBias::PutLean),
        Strike::new(495.0, 4.0).with_bias(OptionBias::PutLean),
        Strike::new(500.0, 6.0),
        Strike::new(505.0, 4.0).with_bias(OptionBias::CallLean),
        Strike::new(510.0, 2.0).with_bias(OptionBias::CallLean),
    ];
    MarketState::new(spot, strikes, MarketDynamics::default()).unwrap()
}

fn remembered(tick: u64, strike_index: usize, strike: f64, hit: bool) -> MemoryEntry {
    MemoryEntry {
        seq: 0,
        tick,
        strike_index,
        strike,
        option_type: OptionType::Call,
        aggressiveness: 0.5,
        hit,
        juice: if hit { 1.0 } else { 0.0 },
        importance: 0.0,
        expires_at: None,
    }
}

#[test]
fn test_cold_start_decision() {
    let market = ladder(500.0);
    let memory = MemoryStore::default();
    let agent = RetailAgent::default();
    let profile = AgentProfile::retail_default();
    let mut rng = StdRng::seed_from_u64(1);

    let action = agent.decide(&market, &memory, &profile, &mut rng);

    assert!(action.strike_index < market.len());
    assert_eq!(action.strike, market.strikes()[action.strike_index].price);
    assert_eq!(action.option_type, OptionType::Call);
    assert_eq!(action.kind, AgentKind::Retail);
    assert!((0.0..=1.0).contains(&action.aggressiveness));
}

#[test]
fn test_same_seed_same_decisions() {
    let market = ladder(500.0);
    let memory = MemoryStore::default();
    let profile = AgentProfile::retail_degen();

    let run = |seed: u64| {
        let agent = build_agent(AgentKind::Retail);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50)
            .map(|_| agent.decide(&market, &memory, &profile, &mut rng).strike_index)
            .collect::<Vec<_>>()
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn test_sampling_is_not_argmax() {
    let market = ladder(500.0);
    let memory = MemoryStore::default();
    let agent = RetailAgent::default();
    let profile = AgentProfile::retail_degen().with_temperature(5.0);
    let mut rng = StdRng::seed_from_u64(3);

    let mut chosen: Vec<usize> = (0..200)
        .map(|_| agent.decide(&market, &memory, &profile, &mut rng).strike_index)
        .collect();
    chosen.sort_unstable();
    chosen.dedup();

    assert!(chosen.len() > 1, "a hot softmax should explore several strikes");
}

#[test]
fn test_no_candidates_falls_back_to_nearest_strike() {
    let market = ladder(502.5);
    let memory = MemoryStore::default();
    let agent = MarketMakerAgent::default();
    let profile = AgentProfile::market_maker_default().with_defense_radius(0.5);
    let mut rng = StdRng::seed_from_u64(9);

    assert!(policy::score_candidates(&agent, &market, &memory, &profile).is_empty());

    let action = agent.decide(&market, &memory, &profile, &mut rng);
    assert_eq!(action.strike_index, market.nearest_strike_index(502.5));
    assert_eq!(action.strike, 500.0);
}

#[test]
fn test_retail_reach_limited_by_risk_tolerance() {
    let market = ladder(500.0);
    let memory = MemoryStore::default();
    let agent = RetailAgent::default();
    let profile = AgentProfile::retail_default().with_risk_tolerance(0.0);

    let indices: Vec<usize> = policy::score_candidates(&agent, &market, &memory, &profile)
        .iter()
        .map(|c| c.index)
        .collect();

    // Reach collapses to one strike spacing around spot
    assert_eq!(indices, vec![1, 2, 3]);
}

#[test]
fn test_fomo_raises_aggressiveness() {
    let market = ladder(500.0);
    let agent = RetailAgent::default();
    let profile = AgentProfile::retail_default();

    let calm = MemoryStore::default();
    let mut hot = MemoryStore::new(MemoryConfig::default());
    for tick in 0..5 {
        hot.record(remembered(tick, 3, 505.0, true));
    }

    let base = agent.aggressiveness(&market, &calm, &profile);
    let boosted = agent.aggressiveness(&market, &hot, &profile);

    assert!(RetailAgent::is_fomo(&hot, &profile));
    assert_relative_eq!(boosted - base, 0.25, epsilon = 1e-12);
}

#[test]
fn test_fomo_cools_off_after_misses_curation_dropped() {
    let agent = RetailAgent::default();
    let market = ladder(500.0);
    let profile = AgentProfile::retail_default();
    // Misses carry no weight here, so a full store of hits evicts each one on arrival
    let mut memory = MemoryStore::new(
        MemoryConfig::default()
            .with_capacity(5)
            .with_miss_importance(0.0),
    );
    for tick in 0..5 {
        memory.record(remembered(tick, 3, 505.0, true));
    }
    assert!(RetailAgent::is_fomo(&memory, &profile));

    for tick in 5..10 {
        memory.record(remembered(tick, 3, 505.0, false));
    }

    assert!(memory.entries().iter().all(|e| e.hit));
    assert!(!RetailAgent::is_fomo(&memory, &profile));
    assert_relative_eq!(
        agent.aggressiveness(&market, &memory, &profile),
        agent.aggressiveness(&market, &MemoryStore::default(), &profile),
        epsilon = 1e-12
    );
}

#[test]
fn test_market_maker_aggressiveness_falls_with_risk_aversion() {
    let market = ladder(500.0);
    let memory = MemoryStore::default();
    let agent = MarketMakerAgent::default();

    let levels: Vec<f64> = [0.0, 0.25, 0.5, 0.75, 1.0]
        .iter()
        .map(|&ra| {
            let profile = AgentProfile::market_maker_default().with_risk_aversion(ra);
            agent.aggressiveness(&market, &memory, &profile)
        })
        .collect();

    assert!(levels.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_market_maker_option_follows_strike_lean() {
    let market = ladder(500.0);
    let agent = MarketMakerAgent::default();
    let profile = AgentProfile::market_maker_default();

    assert_eq!(agent.option_type(&market.strikes()[0], &profile), OptionType::Put);
    assert_eq!(agent.option_type(&market.strikes()[2], &profile), OptionType::Put);
    assert_eq!(agent.option_type(&market.strikes()[4], &profile), OptionType::Call);
}

#[test]
fn test_hits_in_memory_raise_strike_score() {
    let market = ladder(500.0);
    let agent = RetailAgent::default();
    let profile = AgentProfile::retail_default().with_risk_tolerance(1.0);

    let empty = MemoryStore::default();
    let mut lucky = MemoryStore::default();
    for tick in 0..4 {
        lucky.record(remembered(tick, 4, 510.0, true));
    }

    let score_at = |memory: &MemoryStore, index: usize| {
        policy::score_candidates(&agent, &market, memory, &profile)
            .into_iter()
            .find(|c| c.index == index)
            .map(|c| c.score)
            .unwrap()
    };

    assert!(score_at(&lucky, 4) > score_at(&empty, 4));
    assert_relative_eq!(
        score_at(&lucky, 4) - score_at(&empty, 4),
        profile.learning_rate * 1.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_misses_in_memory_lower_strike_score() {
    let market = ladder(500.0);
    let agent = RetailAgent::default();
    let profile = AgentProfile::retail_default();

    let mut burned = MemoryStore::default();
    for tick in 0..4 {
        burned.record(remembered(tick, 2, 500.0, false));
    }

    let candidates = policy::score_candidates(&agent, &market, &burned, &profile);
    let at_spot = candidates.iter().find(|c| c.index == 2).unwrap();
    assert!(at_spot.memory_bias < 0.0);
}
