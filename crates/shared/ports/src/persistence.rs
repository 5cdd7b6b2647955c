use crate::error::PersistenceError;

/// Port for persistence output
///
/// The core only produces snapshots; a sink decides format and cadence.
pub trait SnapshotSink<S> {
    fn persist(&mut self, snapshot: &S) -> Result<(), PersistenceError>;
}

/// Sink that keeps snapshots in memory (tests, replays)
#[derive(Debug, Clone)]
pub struct InMemorySink<S> {
    pub snapshots: Vec<S>,
}

impl<S> InMemorySink<S> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }
}

impl<S> Default for InMemorySink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> SnapshotSink<S> for InMemorySink<S> {
    fn persist(&mut self, snapshot: &S) -> Result<(), PersistenceError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}
