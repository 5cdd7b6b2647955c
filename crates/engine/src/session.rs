//! Simulation Session
//!
//! Owns the whole game: market, both agents, resolver, RNG and scoreboard.
//!
//! A tick runs in two phases. `plan_tick` decides and resolves both shots
//! against the current state using a clone of the RNG, touching nothing.
//! `commit` applies the retail outcome, then the market maker's, then the
//! passive step, validates, and only then swaps the new state in. Dropping a
//! plan therefore aborts the tick without any trace.

use jungle_agents::{Agent, AgentProfile, build_agent};
use jungle_core::{Action, AgentKind, ExposureShift, InvariantViolation, MarketState, ProjectileOutcome};
use jungle_memory::MemoryStore;
use jungle_ports::{ConfigurationError, MarketDataSource, SnapshotSink};
use jungle_resolver::{ProjectileResolver, SlingshotConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::commands::Command;
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::reflexivity::close_loop;
use crate::snapshot::{
    AgentState, AgentView, HaltRecord, RenderSnapshot, SessionSnapshot, SessionStatus,
};
use crate::statistics::SessionStatistics;

/// Mixed into the seed when resuming from a snapshot
const RESTORE_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Everything one agent owns inside a session
struct AgentSlot {
    policy: Box<dyn Agent>,
    profile: AgentProfile,
    slingshot: SlingshotConfig,
    memory: MemoryStore,
    enabled: bool,
    last_action: Option<Action>,
    last_outcome: Option<ProjectileOutcome>,
}

impl AgentSlot {
    fn from_config(config: &SessionConfig, kind: AgentKind) -> Result<Self> {
        let profile = config.profile(kind, config.starting_profile(kind))?.clone();
        let slingshot = config.slingshot(config.starting_slingshot(kind))?.clone();
        Ok(Self {
            policy: build_agent(kind),
            profile,
            slingshot,
            memory: MemoryStore::new(config.memory.clone()),
            enabled: true,
            last_action: None,
            last_outcome: None,
        })
    }

    fn from_state(state: AgentState, kind: AgentKind) -> Self {
        Self {
            policy: build_agent(kind),
            profile: state.profile,
            slingshot: state.slingshot,
            memory: state.memory,
            enabled: state.enabled,
            last_action: None,
            last_outcome: None,
        }
    }

    fn view(&self, top_k: usize) -> AgentView {
        AgentView {
            kind: self.policy.kind(),
            enabled: self.enabled,
            profile: self.profile.name.clone(),
            slingshot: self.slingshot.name.clone(),
            last_action: self.last_action.clone(),
            last_outcome: self.last_outcome.clone(),
            memory: self.memory.summary(top_k),
        }
    }

    fn state(&self) -> AgentState {
        AgentState {
            enabled: self.enabled,
            profile: self.profile.clone(),
            slingshot: self.slingshot.clone(),
            memory: self.memory.clone(),
        }
    }
}

/// Decisions and resolutions for one tick, not yet applied
#[derive(Debug, Clone)]
pub struct TickPlan {
    tick: u64,
    retail: Option<ProjectileOutcome>,
    market_maker: Option<ProjectileOutcome>,
    rng: StdRng,
}

impl TickPlan {
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn outcome(&self, kind: AgentKind) -> Option<&ProjectileOutcome> {
        match kind {
            AgentKind::Retail => self.retail.as_ref(),
            AgentKind::MarketMaker => self.market_maker.as_ref(),
        }
    }
}

/// What a committed tick did
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick the shots were fired on
    pub tick: u64,
    /// Spot after the passive step
    pub spot: f64,
    pub retail: Option<(ProjectileOutcome, ExposureShift)>,
    pub market_maker: Option<(ProjectileOutcome, ExposureShift)>,
    pub status: SessionStatus,
}

pub struct SimulationSession {
    config: SessionConfig,
    seed: u64,
    initial_market: MarketState,
    market: MarketState,
    retail: AgentSlot,
    market_maker: AgentSlot,
    resolver: ProjectileResolver,
    rng: StdRng,
    status: SessionStatus,
    halt: Option<HaltRecord>,
    statistics: SessionStatistics,
}

impl SimulationSession {
    /// Create a session using the market source named in the config
    pub fn new(config: SessionConfig) -> Result<Self> {
        let market = config.market.clone();
        Self::with_source(config, market.source())
    }

    /// Create a session from an explicit market data source
    pub fn with_source(config: SessionConfig, source: &dyn MarketDataSource) -> Result<Self> {
        config.validate()?;

        let initial_market = load_market(&config, source)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let retail = AgentSlot::from_config(&config, AgentKind::Retail)?;
        let market_maker = AgentSlot::from_config(&config, AgentKind::MarketMaker)?;

        log::info!(
            "Session created: {} strikes from {}, spot {:.2}, seed {}",
            initial_market.len(),
            source.name(),
            initial_market.spot(),
            seed
        );

        Ok(Self {
            resolver: ProjectileResolver::new(config.resolver.clone()),
            statistics: SessionStatistics::for_market(&initial_market),
            market: initial_market.clone(),
            initial_market,
            retail,
            market_maker,
            rng: StdRng::seed_from_u64(seed),
            seed,
            status: SessionStatus::Running,
            halt: None,
            config,
        })
    }

    /// Resume from a saved snapshot
    ///
    /// The market, memories, profiles and statistics are restored exactly.
    /// The RNG is reseeded from the saved seed and tick, so a resumed run is
    /// reproducible but does not replay the original run's future draws.
    pub fn restore(config: SessionConfig, snapshot: SessionSnapshot) -> Result<Self> {
        config.validate()?;
        snapshot
            .market
            .validate()
            .map_err(|e| ConfigurationError::InvalidMarketData(e.to_string()))?;
        snapshot.retail.validate()?;
        snapshot.market_maker.validate()?;

        let initial_market = load_market(&config, config.market.source())?;
        let tick = snapshot.tick();
        let mut status = match snapshot.status {
            SessionStatus::Halted => SessionStatus::Paused,
            other => other,
        };
        if config
            .max_ticks
            .is_some_and(|budget| snapshot.statistics.ticks >= budget)
        {
            status = SessionStatus::Finished;
        }

        log::info!("Session restored at tick {} ({})", tick, status);

        Ok(Self {
            resolver: ProjectileResolver::new(config.resolver.clone()),
            rng: StdRng::seed_from_u64(snapshot.seed ^ tick.wrapping_mul(RESTORE_SALT)),
            seed: snapshot.seed,
            initial_market,
            market: snapshot.market,
            retail: AgentSlot::from_state(snapshot.retail, AgentKind::Retail),
            market_maker: AgentSlot::from_state(snapshot.market_maker, AgentKind::MarketMaker),
            statistics: snapshot.statistics,
            status,
            halt: None,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn market(&self) -> &MarketState {
        &self.market
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn halt_record(&self) -> Option<&HaltRecord> {
        self.halt.as_ref()
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.statistics
    }

    pub fn memory(&self, kind: AgentKind) -> &MemoryStore {
        &self.slot(kind).memory
    }

    pub fn profile(&self, kind: AgentKind) -> &AgentProfile {
        &self.slot(kind).profile
    }

    pub fn slingshot(&self, kind: AgentKind) -> &SlingshotConfig {
        &self.slot(kind).slingshot
    }

    pub fn is_enabled(&self, kind: AgentKind) -> bool {
        self.slot(kind).enabled
    }

    fn slot(&self, kind: AgentKind) -> &AgentSlot {
        match kind {
            AgentKind::Retail => &self.retail,
            AgentKind::MarketMaker => &self.market_maker,
        }
    }

    fn slot_mut(&mut self, kind: AgentKind) -> &mut AgentSlot {
        match kind {
            AgentKind::Retail => &mut self.retail,
            AgentKind::MarketMaker => &mut self.market_maker,
        }
    }

    // ========================================================================
    // Ticking
    // ========================================================================

    /// Decide and resolve this tick's shots without mutating anything
    ///
    /// Returns `None` unless the session is running.
    pub fn plan_tick(&self) -> Option<TickPlan> {
        if self.status != SessionStatus::Running || self.budget_spent() {
            return None;
        }

        let mut rng = self.rng.clone();
        let market = &self.market;

        let decide = |slot: &AgentSlot, rng: &mut StdRng| {
            slot.enabled
                .then(|| slot.policy.decide(market, &slot.memory, &slot.profile, rng))
        };
        let retail_action = decide(&self.retail, &mut rng);
        let mm_action = decide(&self.market_maker, &mut rng);

        let retail = retail_action.as_ref().map(|action| {
            self.resolver.resolve_contested(
                action,
                &self.retail.slingshot,
                market,
                mm_action.as_ref(),
                &mut rng,
            )
        });
        let market_maker = mm_action.as_ref().map(|action| {
            self.resolver
                .resolve(action, &self.market_maker.slingshot, market, &mut rng)
        });

        Some(TickPlan {
            tick: market.tick(),
            retail,
            market_maker,
            rng,
        })
    }

    /// Apply a plan: retail outcome, market-maker outcome, passive step, validate
    ///
    /// State is staged on copies and swapped in only when every invariant
    /// holds. On a violation the session halts and keeps its pre-tick state.
    pub fn commit(&mut self, plan: TickPlan) -> Result<TickReport> {
        match self.status {
            SessionStatus::Running => {}
            SessionStatus::Halted => {
                return Err(SessionError::Halted {
                    tick: self.market.tick(),
                });
            }
            status => {
                return Err(SessionError::NotRunning {
                    tick: self.market.tick(),
                    status,
                });
            }
        }
        if self.budget_spent() {
            self.status = SessionStatus::Finished;
            return Err(SessionError::NotRunning {
                tick: self.market.tick(),
                status: self.status,
            });
        }
        if plan.tick != self.market.tick() {
            return Err(SessionError::StalePlan {
                planned: plan.tick,
                current: self.market.tick(),
            });
        }

        let TickPlan {
            tick,
            retail,
            market_maker,
            mut rng,
        } = plan;

        let mut market = self.market.clone();
        let mut retail_memory = self.retail.memory.clone();
        let mut mm_memory = self.market_maker.memory.clone();
        let mut statistics = self.statistics.clone();

        let retail = match fold_outcome(&mut market, &mut retail_memory, &mut statistics, retail) {
            Ok(folded) => folded,
            Err(violation) => return Err(self.halt_at(tick, violation)),
        };
        let market_maker =
            match fold_outcome(&mut market, &mut mm_memory, &mut statistics, market_maker) {
                Ok(folded) => folded,
                Err(violation) => return Err(self.halt_at(tick, violation)),
            };

        market.advance_tick(&mut rng);
        if let Err(violation) = market.validate() {
            return Err(self.halt_at(tick, violation));
        }
        statistics.ticks += 1;

        // Commit point
        self.market = market;
        self.retail.memory = retail_memory;
        self.market_maker.memory = mm_memory;
        self.statistics = statistics;
        self.rng = rng;
        self.retail.last_action = retail.as_ref().map(|(o, _)| o.action.clone());
        self.retail.last_outcome = retail.as_ref().map(|(o, _)| o.clone());
        self.market_maker.last_action = market_maker.as_ref().map(|(o, _)| o.action.clone());
        self.market_maker.last_outcome = market_maker.as_ref().map(|(o, _)| o.clone());

        if self.budget_spent() {
            self.status = SessionStatus::Finished;
            log::info!("Trial budget of {} ticks reached", self.statistics.ticks);
        }

        Ok(TickReport {
            tick,
            spot: self.market.spot(),
            retail,
            market_maker,
            status: self.status,
        })
    }

    /// Plan and commit one tick
    ///
    /// Returns `Ok(None)` when paused or finished.
    pub fn tick(&mut self) -> Result<Option<TickReport>> {
        if self.status == SessionStatus::Halted {
            return Err(SessionError::Halted {
                tick: self.market.tick(),
            });
        }
        match self.plan_tick() {
            Some(plan) => self.commit(plan).map(Some),
            None => Ok(None),
        }
    }

    /// Run up to `ticks` ticks; stops early when paused or finished
    ///
    /// Returns the number of ticks committed.
    pub fn run(&mut self, ticks: u64) -> Result<u64> {
        let mut done = 0;
        while done < ticks {
            match self.tick()? {
                Some(report) => {
                    done += 1;
                    if report.tick % 100 == 0 {
                        log::info!(
                            "Tick {}: spot={:.2} exposure={:.2} retail_juice={:.2} mm_juice={:.2}",
                            report.tick,
                            report.spot,
                            self.market.total_exposure(),
                            self.statistics.retail.juice,
                            self.statistics.market_maker.juice
                        );
                    }
                }
                None => break,
            }
        }
        Ok(done)
    }

    fn budget_spent(&self) -> bool {
        self.config
            .max_ticks
            .is_some_and(|budget| self.statistics.ticks >= budget)
    }

    fn halt_at(&mut self, tick: u64, violation: InvariantViolation) -> SessionError {
        log::error!("Invariant violated at tick {}: {}", tick, violation);
        self.status = SessionStatus::Halted;
        self.halt = Some(HaltRecord::new(tick, &violation));
        SessionError::Invariant {
            tick,
            source: violation,
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn execute(&mut self, command: Command) -> Result<()> {
        log::debug!("Command: {:?}", command);
        match command {
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => match self.status {
                SessionStatus::Paused => self.resume(),
                _ => self.pause(),
            },
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::ToggleAgent { kind } => {
                self.toggle_agent(kind);
                Ok(())
            }
            Command::SwitchProfile { kind, name } => self.switch_profile(kind, &name),
            Command::SelectSlingshot { kind, name } => self.select_slingshot(kind, &name),
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        match self.status {
            SessionStatus::Halted => Err(SessionError::Halted {
                tick: self.market.tick(),
            }),
            SessionStatus::Running => {
                self.status = SessionStatus::Paused;
                Ok(())
            }
            SessionStatus::Paused | SessionStatus::Finished => Ok(()),
        }
    }

    pub fn resume(&mut self) -> Result<()> {
        match self.status {
            SessionStatus::Halted => Err(SessionError::Halted {
                tick: self.market.tick(),
            }),
            SessionStatus::Paused => {
                self.status = SessionStatus::Running;
                Ok(())
            }
            SessionStatus::Running | SessionStatus::Finished => Ok(()),
        }
    }

    /// Restore the initial market, empty both memories and restart the RNG
    ///
    /// Selected profiles, slingshots and enabled flags are kept.
    pub fn reset(&mut self) {
        self.market = self.initial_market.clone();
        self.retail.memory = MemoryStore::new(self.config.memory.clone());
        self.market_maker.memory = MemoryStore::new(self.config.memory.clone());
        for slot in [&mut self.retail, &mut self.market_maker] {
            slot.last_action = None;
            slot.last_outcome = None;
        }
        self.statistics = SessionStatistics::for_market(&self.market);
        self.rng = StdRng::seed_from_u64(self.seed);
        self.status = SessionStatus::Running;
        self.halt = None;
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Flip an agent on or off; returns the new state
    pub fn toggle_agent(&mut self, kind: AgentKind) -> bool {
        let slot = self.slot_mut(kind);
        slot.enabled = !slot.enabled;
        let enabled = slot.enabled;
        log::info!("{} {}", kind, if enabled { "enabled" } else { "disabled" });
        enabled
    }

    pub fn switch_profile(&mut self, kind: AgentKind, name: &str) -> Result<()> {
        let profile = self.config.profile(kind, name)?.clone();
        log::info!("{} profile: {} -> {}", kind, self.slot(kind).profile.name, name);
        self.slot_mut(kind).profile = profile;
        Ok(())
    }

    pub fn select_slingshot(&mut self, kind: AgentKind, name: &str) -> Result<()> {
        let slingshot = self.config.slingshot(name)?.clone();
        log::info!("{} slingshot: {}", kind, name);
        self.slot_mut(kind).slingshot = slingshot;
        Ok(())
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Read-only view for rendering, with the top `k` memories per agent
    pub fn render_snapshot(&self, k: usize) -> RenderSnapshot {
        RenderSnapshot {
            tick: self.market.tick(),
            spot: self.market.spot(),
            status: self.status,
            halt: self.halt.clone(),
            gamma_profile: self.market.gamma_profile(),
            retail: self.retail.view(k),
            market_maker: self.market_maker.view(k),
            statistics: self.statistics.clone(),
        }
    }

    /// Render snapshot with the configured number of top memories
    pub fn render(&self) -> RenderSnapshot {
        self.render_snapshot(self.config.render_top_k)
    }

    /// Full state for persistence
    pub fn save_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.seed,
            status: self.status,
            market: self.market.clone(),
            retail: self.retail.state(),
            market_maker: self.market_maker.state(),
            statistics: self.statistics.clone(),
        }
    }

    /// Hand the current snapshot to a save manager
    pub fn persist<S: SnapshotSink<SessionSnapshot> + ?Sized>(&self, sink: &mut S) -> Result<()> {
        sink.persist(&self.save_snapshot())?;
        Ok(())
    }
}

/// Close the loop for one optional outcome on staged state
fn fold_outcome(
    market: &mut MarketState,
    memory: &mut MemoryStore,
    statistics: &mut SessionStatistics,
    outcome: Option<ProjectileOutcome>,
) -> std::result::Result<Option<(ProjectileOutcome, ExposureShift)>, InvariantViolation> {
    let Some(outcome) = outcome else {
        return Ok(None);
    };
    let shift = close_loop(market, memory, &outcome)?;
    statistics.record(&outcome, &shift);
    Ok(Some((outcome, shift)))
}

fn load_market(config: &SessionConfig, source: &dyn MarketDataSource) -> Result<MarketState> {
    let seed = source.load()?;
    let market = MarketState::new(seed.spot, seed.strikes, config.dynamics.clone())
        .map_err(|e| ConfigurationError::InvalidMarketData(e.to_string()))?;
    Ok(market)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jungle_core::{DteBand, MarketDynamics, Strike};
    use jungle_ports::{ConfigResult, MarketSeed};

    struct FixedLadder;

    impl MarketDataSource for FixedLadder {
        fn load(&self) -> ConfigResult<MarketSeed> {
            Ok(MarketSeed {
                spot: 500.0,
                strikes: vec![
                    Strike::new(495.0, 50.0),
                    Strike::new(500.0, 100.0),
                    Strike::new(505.0, 50.0),
                ],
            })
        }
    }

    fn session() -> SimulationSession {
        SimulationSession::with_source(SessionConfig::default().with_seed(7), &FixedLadder).unwrap()
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let session = session();
        let before = session.save_snapshot();

        let plan = session.plan_tick().unwrap();
        assert_eq!(plan.tick(), 0);
        drop(plan);

        assert_eq!(session.save_snapshot(), before);
    }

    #[test]
    fn test_commit_advances_one_tick() {
        let mut session = session();
        let report = session.tick().unwrap().unwrap();

        assert_eq!(report.tick, 0);
        assert_eq!(session.market().tick(), 1);
        assert_eq!(session.memory(AgentKind::Retail).len(), 1);
        assert_eq!(session.memory(AgentKind::MarketMaker).len(), 1);
        assert_eq!(session.statistics().ticks, 1);
    }

    #[test]
    fn test_invariant_violation_halts_without_mutation() {
        let mut session = session();
        let before = session.save_snapshot();

        let mut plan = session.plan_tick().unwrap();
        if let Some(outcome) = plan.retail.as_mut() {
            outcome.action.strike_index = 99;
        }

        let err = session.commit(plan).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Invariant {
                tick: 0,
                source: InvariantViolation::StrikeOutOfRange { index: 99, .. }
            }
        ));
        assert_eq!(session.status(), SessionStatus::Halted);
        assert_eq!(session.halt_record().unwrap().tick, 0);
        assert_eq!(session.market(), &before.market);
        assert!(session.memory(AgentKind::Retail).is_empty());

        assert!(matches!(session.tick(), Err(SessionError::Halted { tick: 0 })));
        assert!(session.execute(Command::Resume).is_err());

        session.execute(Command::Reset).unwrap();
        assert_eq!(session.status(), SessionStatus::Running);
        assert!(session.halt_record().is_none());
        assert!(session.tick().unwrap().is_some());
    }

    #[test]
    fn test_paused_session_does_not_tick() {
        let mut session = session();
        session.execute(Command::Pause).unwrap();
        assert!(session.plan_tick().is_none());
        assert!(session.tick().unwrap().is_none());

        session.execute(Command::TogglePause).unwrap();
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn test_stale_plan_rejected() {
        let mut session = session();
        let plan = session.plan_tick().unwrap();
        session.tick().unwrap();

        assert!(matches!(
            session.commit(plan),
            Err(SessionError::StalePlan { planned: 0, current: 1 })
        ));
    }

    #[test]
    fn test_pause_between_plan_and_commit_aborts_tick() {
        let mut session = session();
        let before = session.save_snapshot();

        let plan = session.plan_tick().unwrap();
        session.pause().unwrap();

        assert!(matches!(
            session.commit(plan),
            Err(SessionError::NotRunning {
                tick: 0,
                status: SessionStatus::Paused
            })
        ));
        assert_eq!(session.market().tick(), 0);
        let mut after = session.save_snapshot();
        after.status = before.status;
        assert_eq!(after, before);
    }

    #[test]
    fn test_restore_past_budget_is_finished() {
        let mut session = session();
        session.run(5).unwrap();
        let snapshot = session.save_snapshot();

        let config = SessionConfig::default().with_seed(7).with_max_ticks(3);
        let restored = SimulationSession::restore(config, snapshot).unwrap();

        assert_eq!(restored.status(), SessionStatus::Finished);
        assert!(restored.plan_tick().is_none());
    }

    #[test]
    fn test_restore_rejects_invalid_agent_state() {
        let mut session = session();
        session.run(10).unwrap();
        let json = serde_json::to_value(session.save_snapshot()).unwrap();

        let mut cold = json.clone();
        cold["retail"]["profile"]["temperature"] = serde_json::json!(0.0);
        let snapshot: SessionSnapshot = serde_json::from_value(cold).unwrap();
        assert!(matches!(
            SimulationSession::restore(SessionConfig::default(), snapshot),
            Err(SessionError::Configuration(ConfigurationError::OutOfRange { .. }))
        ));

        let mut shrunk = json.clone();
        shrunk["market_maker"]["memory"]["config"]["capacity"] = serde_json::json!(2);
        let snapshot: SessionSnapshot = serde_json::from_value(shrunk).unwrap();
        assert!(matches!(
            SimulationSession::restore(SessionConfig::default(), snapshot),
            Err(SessionError::Configuration(ConfigurationError::OutOfRange { parameter, .. }))
                if parameter == "memory.entries"
        ));

        let mut broken = json;
        broken["retail"]["slingshot"]["accuracy"] = serde_json::json!(1.5);
        let snapshot: SessionSnapshot = serde_json::from_value(broken).unwrap();
        assert!(SimulationSession::restore(SessionConfig::default(), snapshot).is_err());
    }

    #[test]
    fn test_disabled_agent_does_not_shoot() {
        let mut session = session();
        assert!(!session.toggle_agent(AgentKind::MarketMaker));

        let report = session.tick().unwrap().unwrap();
        assert!(report.retail.is_some());
        assert!(report.market_maker.is_none());
        assert!(session.memory(AgentKind::MarketMaker).is_empty());
    }

    #[test]
    fn test_budget_finishes_session() {
        let mut session = SimulationSession::with_source(
            SessionConfig::default().with_seed(1).with_max_ticks(3),
            &FixedLadder,
        )
        .unwrap();

        assert_eq!(session.run(10).unwrap(), 3);
        assert_eq!(session.status(), SessionStatus::Finished);
        assert!(session.tick().unwrap().is_none());
    }

    #[test]
    fn test_unknown_profile_and_slingshot_rejected() {
        let mut session = session();
        assert!(session.switch_profile(AgentKind::Retail, "nope").is_err());
        assert!(session.select_slingshot(AgentKind::Retail, "nope").is_err());
        assert_eq!(session.profile(AgentKind::Retail).name, "retail_default");

        session.switch_profile(AgentKind::Retail, "retail_degen").unwrap();
        assert_eq!(session.profile(AgentKind::Retail).name, "retail_degen");
    }

    #[test]
    fn test_invalid_source_is_configuration_error() {
        struct Unsorted;
        impl MarketDataSource for Unsorted {
            fn load(&self) -> ConfigResult<MarketSeed> {
                Ok(MarketSeed {
                    spot: 500.0,
                    strikes: vec![Strike::new(505.0, 1.0), Strike::new(500.0, 1.0)],
                })
            }
        }

        let result = SimulationSession::with_source(SessionConfig::default(), &Unsorted);
        assert!(matches!(
            result,
            Err(SessionError::Configuration(ConfigurationError::InvalidMarketData(_)))
        ));
    }

    #[test]
    fn test_dte_gated_shots_are_expired_misses() {
        struct FarExpiry;
        impl MarketDataSource for FarExpiry {
            fn load(&self) -> ConfigResult<MarketSeed> {
                Ok(MarketSeed {
                    spot: 500.0,
                    strikes: vec![Strike::new(500.0, 100.0).with_dte_band(DteBand::new(90, 180))],
                })
            }
        }

        let config = SessionConfig::default()
            .with_seed(3)
            .with_dynamics(MarketDynamics::frozen());
        let mut session = SimulationSession::with_source(config, &FarExpiry).unwrap();
        session.run(20).unwrap();

        let stats = session.statistics();
        assert_eq!(stats.retail.hits, 0);
        assert_eq!(stats.retail.expired, 20);
        assert_eq!(stats.market_maker.hits, 0);
    }
}
