//! JSON File Sink
//!
//! Writes each snapshot to its own pretty-printed file,
//! named `<prefix>_t<tick>_<utc timestamp>.json`.

use chrono::Utc;
use jungle_engine::SessionSnapshot;
use jungle_ports::{PersistenceError, SnapshotSink};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_PREFIX: &str = "jungle";

#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
    prefix: String,
    /// Persist only every n-th snapshot handed over
    every: u64,
    offered: u64,
    written: Vec<PathBuf>,
}

impl JsonFileSink {
    /// Create the sink, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: DEFAULT_PREFIX.to_string(),
            every: 1,
            offered: 0,
            written: Vec::new(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Keep one snapshot out of every `n` (0 is treated as 1)
    pub fn with_cadence(mut self, n: u64) -> Self {
        self.every = n.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written by this sink, oldest first
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn file_name(&self, tick: u64) -> String {
        format!(
            "{}_t{:06}_{}.json",
            self.prefix,
            tick,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }

    /// All snapshot files in the directory carrying this sink's prefix, sorted by name
    pub fn list_saved(&self) -> Result<Vec<PathBuf>, PersistenceError> {
        let mut saved = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&self.prefix) && n.ends_with(".json"));
            if matches {
                saved.push(path);
            }
        }
        saved.sort();
        Ok(saved)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<SessionSnapshot, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(SessionSnapshot::from_json(&json)?)
    }
}

impl SnapshotSink<SessionSnapshot> for JsonFileSink {
    fn persist(&mut self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        self.offered += 1;
        if (self.offered - 1) % self.every != 0 {
            return Ok(());
        }

        let path = self.dir.join(self.file_name(snapshot.tick()));
        fs::write(&path, snapshot.to_json()?)?;
        log::info!("Saved snapshot at tick {} to {}", snapshot.tick(), path.display());
        self.written.push(path);
        Ok(())
    }
}
