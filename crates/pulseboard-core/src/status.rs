use pulseboard_models::presence::PresenceSnapshot;
use tokio::sync::watch;

/// Latest normalized presence snapshot.
///
/// Single writer (the presence pipeline); any number of readers.
/// Reads never block and always return the last fully written
/// snapshot.
#[derive(Clone)]
pub struct StatusStore {
    tx: watch::Sender<PresenceSnapshot>,
}

impl StatusStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(PresenceSnapshot::default());
        Self { tx }
    }

    pub fn current(&self) -> PresenceSnapshot {
        self.tx.borrow().clone()
    }

    /// Sole mutator, called only by the presence pipeline.
    pub fn replace(&self, snapshot: PresenceSnapshot) {
        self.tx.send_replace(snapshot);
    }

    /// Watch for snapshot replacements, e.g. to log status transitions.
    pub fn subscribe(&self) -> watch::Receiver<PresenceSnapshot> {
        self.tx.subscribe()
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}
