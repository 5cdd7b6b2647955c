//! Headless run: sink output, reload and summary

use approx::assert_relative_eq;
use jungle_core::AgentKind;
use jungle_engine::{SessionStatus, SimulationSession, load_default_config};
use jungle_runner::{JsonFileSink, RunSummary};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jungle_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn session(seed: u64) -> SimulationSession {
    SimulationSession::new(load_default_config().unwrap().with_seed(seed)).unwrap()
}

#[test]
fn test_sink_writes_loadable_snapshots() {
    let dir = scratch_dir("sink");
    let mut sink = JsonFileSink::new(&dir).unwrap();
    let mut session = session(11);

    session.run(25).unwrap();
    session.persist(&mut sink).unwrap();
    session.run(25).unwrap();
    session.persist(&mut sink).unwrap();

    let saved = sink.list_saved().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(sink.written().len(), 2);

    // Tick is zero-padded, so name order is tick order
    let first = JsonFileSink::load(&saved[0]).unwrap();
    let last = JsonFileSink::load(&saved[1]).unwrap();
    assert_eq!(first.tick(), 25);
    assert_eq!(last, session.save_snapshot());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_cadence_skips_snapshots() {
    let dir = scratch_dir("cadence");
    let mut sink = JsonFileSink::new(&dir).unwrap().with_cadence(3);
    let mut session = session(12);

    for _ in 0..7 {
        session.run(1).unwrap();
        session.persist(&mut sink).unwrap();
    }

    // Offers 1, 4 and 7 are kept
    assert_eq!(sink.written().len(), 3);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_resume_from_saved_file() {
    let dir = scratch_dir("resume");
    let mut sink = JsonFileSink::new(&dir).unwrap().with_prefix("resume");
    let mut original = session(13);
    original.run(60).unwrap();
    original.persist(&mut sink).unwrap();

    let snapshot = JsonFileSink::load(&sink.written()[0]).unwrap();
    let mut resumed = SimulationSession::restore(original.config().clone(), snapshot).unwrap();
    assert_eq!(resumed.market(), original.market());
    assert_eq!(resumed.statistics(), original.statistics());

    assert_eq!(resumed.run(40).unwrap(), 40);
    assert_eq!(resumed.market().tick(), 100);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_summary_matches_statistics() {
    let config = load_default_config().unwrap().with_seed(14).with_max_ticks(50);
    let mut session = SimulationSession::new(config).unwrap();
    session.run(50).unwrap();

    let summary = RunSummary::from_session(&session);
    let stats = session.statistics();

    assert_eq!(summary.ticks, 50);
    assert_eq!(summary.seed, 14);
    assert_eq!(summary.status, SessionStatus::Finished);
    assert_eq!(summary.retail.shots, stats.retail.shots);
    assert_eq!(summary.market_maker.hits, stats.market_maker.hits);
    assert_relative_eq!(summary.retail.juice, stats.retail.juice);
    assert_relative_eq!(summary.total_exposure, session.market().total_exposure());
    assert_eq!(summary.retail.profile, session.profile(AgentKind::Retail).name);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["status"], "finished");
    assert_eq!(json["retail"]["kind"], "retail");
}
