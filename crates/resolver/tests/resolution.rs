//! Resolver behaviour against a live market state

use jungle_core::{
    Action, AgentId, AgentKind, DteBand, MarketDynamics, MarketState, OptionType, Strike,
};
use jungle_resolver::{ProjectileResolver, ResolverConfig, SlingshotConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn market_with_band(band: DteBand) -> MarketState {
    let strikes = vec![
        Strike::new(495.0, 50.0),
        Strike::new(500.0, 100.0).with_dte_band(band),
        Strike::new(505.0, 50.0),
    ];
    MarketState::new(500.0, strikes, MarketDynamics::default()).unwrap()
}

fn retail_shot(aggressiveness: f64) -> Action {
    Action::new(
        AgentId::new("retail"),
        AgentKind::Retail,
        1,
        500.0,
        OptionType::Call,
        aggressiveness,
    )
}

#[test]
fn test_dte_mismatch_always_misses() {
    let market = market_with_band(DteBand::new(20, 40));
    let resolver = ProjectileResolver::new(ResolverConfig::neutral());
    let mut slingshot = SlingshotConfig::weekly_call();
    slingshot.accuracy = 1.0;

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let outcome = resolver.resolve(&retail_shot(0.5), &slingshot, &market, &mut rng);
        assert!(outcome.expired);
        assert!(!outcome.hit);
        assert_eq!(outcome.juice, 0.0);
    }
}

#[test]
fn test_matching_dte_with_certain_accuracy_always_hits() {
    let market = market_with_band(DteBand::new(0, 10));
    let resolver = ProjectileResolver::new(ResolverConfig::neutral());
    let mut slingshot = SlingshotConfig::weekly_call();
    slingshot.accuracy = 1.0;

    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..500 {
        let outcome = resolver.resolve(&retail_shot(0.5), &slingshot, &market, &mut rng);
        assert!(!outcome.expired);
        assert!(outcome.hit);
        assert!(outcome.juice > 0.0);
    }
}

#[test]
fn test_seeded_resolution_replays() {
    let market = market_with_band(DteBand::any());
    let resolver = ProjectileResolver::default();
    let slingshot = SlingshotConfig::zero_dte_call();

    let run = || {
        let mut rng = StdRng::seed_from_u64(2024);
        (0..100)
            .map(|_| resolver.resolve(&retail_shot(0.8), &slingshot, &market, &mut rng))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_empirical_hit_rate_matches_probability() {
    let market = market_with_band(DteBand::any());
    let resolver = ProjectileResolver::default();
    let slingshot = SlingshotConfig::weekly_call();
    let shot = retail_shot(0.6);

    let mut rng = StdRng::seed_from_u64(7);
    let trials = 20_000;
    let mut hits = 0usize;
    let mut expected = 0.0;
    for _ in 0..trials {
        let outcome = resolver.resolve(&shot, &slingshot, &market, &mut rng);
        expected = outcome.hit_probability;
        hits += usize::from(outcome.hit);
    }

    let rate = hits as f64 / trials as f64;
    assert!(
        (rate - expected).abs() < 0.02,
        "hit rate {rate:.4} too far from probability {expected:.4}"
    );
}

#[test]
fn test_market_maker_defence_marks_contested() {
    let market = market_with_band(DteBand::any());
    let resolver = ProjectileResolver::default();
    let slingshot = SlingshotConfig::weekly_call();
    let defender = Action::new(
        AgentId::new("market_maker"),
        AgentKind::MarketMaker,
        1,
        500.0,
        OptionType::Put,
        0.9,
    );
    let elsewhere = Action { strike_index: 0, strike: 495.0, ..defender.clone() };

    let mut rng = StdRng::seed_from_u64(5);
    let defended =
        resolver.resolve_contested(&retail_shot(0.2), &slingshot, &market, Some(&defender), &mut rng);
    let undefended =
        resolver.resolve_contested(&retail_shot(0.2), &slingshot, &market, Some(&elsewhere), &mut rng);

    assert!(defended.contested);
    assert!(!undefended.contested);
    assert!(defended.hit_probability < undefended.hit_probability);
}

#[test]
fn test_miss_pays_nothing() {
    let market = market_with_band(DteBand::any());
    let resolver = ProjectileResolver::default();
    let mut slingshot = SlingshotConfig::weekly_call();
    slingshot.accuracy = 0.0;

    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..200 {
        let outcome = resolver.resolve(&retail_shot(1.0), &slingshot, &market, &mut rng);
        if !outcome.hit {
            assert_eq!(outcome.juice, 0.0);
        }
        assert!(outcome.accuracy_roll >= 0.0 && outcome.accuracy_roll < 1.0);
        assert!(outcome.power_roll >= 0.5 && outcome.power_roll < 1.5);
    }
}
