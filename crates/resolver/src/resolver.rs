//! Projectile Resolver
//!
//! Turns an action into an outcome. Deterministic given its inputs and the
//! random source: both rolls are always drawn, in the same order, so a seeded
//! source replays exactly.

use jungle_core::{Action, AgentKind, MarketState, ProjectileOutcome, Strike};
use rand::Rng;

use crate::config::ResolverConfig;
use crate::slingshot::SlingshotConfig;

/// Range of the power roll
const POWER_ROLL_MIN: f64 = 0.5;
const POWER_ROLL_MAX: f64 = 1.5;

#[derive(Debug, Clone, Default)]
pub struct ProjectileResolver {
    config: ResolverConfig,
}

impl ProjectileResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve an uncontested shot
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        action: &Action,
        slingshot: &SlingshotConfig,
        market: &MarketState,
        rng: &mut R,
    ) -> ProjectileOutcome {
        self.resolve_contested(action, slingshot, market, None, rng)
    }

    /// Resolve a shot that the opposing agent may be defending
    ///
    /// A defence only applies when a market maker targets the same strike a
    /// retail shot goes for.
    pub fn resolve_contested<R: Rng + ?Sized>(
        &self,
        action: &Action,
        slingshot: &SlingshotConfig,
        market: &MarketState,
        defender: Option<&Action>,
        rng: &mut R,
    ) -> ProjectileOutcome {
        let accuracy_roll = rng.r#gen::<f64>();
        let power_roll = rng.gen_range(POWER_ROLL_MIN..POWER_ROLL_MAX);

        let defender = defender.filter(|d| {
            action.kind == AgentKind::Retail
                && d.kind == AgentKind::MarketMaker
                && d.strike_index == action.strike_index
        });
        let contested = defender.is_some();

        let Some(strike) = market.strike(action.strike_index) else {
            log::warn!(
                "{} aimed at strike #{} which is not on the ladder",
                action.agent,
                action.strike_index
            );
            return ProjectileOutcome {
                action: action.clone(),
                hit: false,
                juice: 0.0,
                hit_probability: 0.0,
                accuracy_roll,
                power_roll,
                expired: false,
                contested,
            };
        };

        let expired = !strike.dte_band.contains(slingshot.dte);
        let hit_probability = self.hit_probability(
            action,
            slingshot,
            strike,
            market.mean_exposure(),
            defender.map(|d| d.aggressiveness),
        );

        let hit = !expired && accuracy_roll < hit_probability;
        let juice = if hit {
            self.juice(action, slingshot, strike.exposure, power_roll)
        } else {
            0.0
        };

        if expired {
            log::debug!(
                "{}: {} ({} DTE) cannot reach strike {} (band {})",
                action.agent,
                slingshot.name,
                slingshot.dte,
                strike.price,
                strike.dte_band
            );
        }

        ProjectileOutcome {
            action: action.clone(),
            hit,
            juice,
            hit_probability,
            accuracy_roll,
            power_roll,
            expired,
            contested,
        }
    }

    /// Probability that `action` hits `strike`, before the DTE gate
    ///
    /// `defender_aggressiveness` is the aggressiveness of a defender on the
    /// same strike, if any.
    pub fn hit_probability(
        &self,
        action: &Action,
        slingshot: &SlingshotConfig,
        strike: &Strike,
        mean_exposure: f64,
        defender_aggressiveness: Option<f64>,
    ) -> f64 {
        let c = &self.config;

        let mut accuracy = slingshot.accuracy * (1.0 - c.accuracy_penalty * action.aggressiveness);
        if slingshot.option_type != action.option_type {
            accuracy *= c.option_mismatch_factor;
        }

        let denominator = strike.exposure + mean_exposure;
        let relative_exposure = if denominator > 0.0 {
            strike.exposure / denominator
        } else {
            0.0
        };
        let alignment = strike.bias.alignment(action.option_type);
        let exposure_factor = 1.0 + c.exposure_weight * alignment * relative_exposure;

        let defense_factor = match defender_aggressiveness {
            Some(aggr) => 1.0 - c.defense_strength * aggr.clamp(0.0, 1.0),
            None => 1.0,
        };

        let p = accuracy * exposure_factor * defense_factor;
        if p.is_finite() {
            p.clamp(c.min_hit_probability, c.max_hit_probability)
        } else {
            c.min_hit_probability
        }
    }

    /// Payout for a hit
    pub fn juice(
        &self,
        action: &Action,
        slingshot: &SlingshotConfig,
        exposure: f64,
        power_roll: f64,
    ) -> f64 {
        let c = &self.config;
        c.juice_scale
            * exposure
            * slingshot.power
            * (1.0 + c.power_gain * action.aggressiveness)
            * power_roll
    }
}
