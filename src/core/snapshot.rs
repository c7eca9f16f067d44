//! Current-snapshot holder for the engine's UI-facing boundary.
//!
//! The HTTP layer serves snapshots on demand, so nothing in this crate keeps
//! a cell alive between requests; the type exists for presentation-layer
//! consumers that want to watch one group's snapshot across refreshes.

use tokio::sync::watch;

use crate::core::models::balance::Balance;

/// Holds the most recent balance snapshot for one group.
///
/// A refresh replaces the snapshot wholesale; nothing ever patches it
/// field-by-field. Subscribers observe each replacement and must treat a new
/// snapshot as invalidating any partitions or suggestions derived from the
/// previous one.
pub struct SnapshotCell {
    tx: watch::Sender<Vec<Balance>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        SnapshotCell { tx }
    }

    /// Replace the current snapshot, waking all subscribers.
    pub fn replace(&self, snapshot: Vec<Balance>) {
        self.tx.send_replace(snapshot);
    }

    /// A copy of the current snapshot.
    pub fn current(&self) -> Vec<Balance> {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Balance>> {
        self.tx.subscribe()
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new()
    }
}
