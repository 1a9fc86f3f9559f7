//! Atomically swappable snapshot reference.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::{ArcSwap, ArcSwapOption};
use equinet_core::errors::EquinetResult;
use equinet_index::{load_snapshot, Snapshot};
use equinet_observability::events;

/// Holds the snapshot queries run against.
///
/// Readers never block. Writers (swap, reload, rollback) are serialized
/// among themselves. The snapshot replaced by the last swap is kept so a
/// snapshot found corrupt at query time can be rolled back.
pub struct SnapshotHandle {
    current: ArcSwap<Snapshot>,
    previous: ArcSwapOption<Snapshot>,
    writer: Mutex<()>,
}

impl SnapshotHandle {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
            previous: ArcSwapOption::empty(),
            writer: Mutex::new(()),
        }
    }

    /// Load the initial snapshot from a snapshot directory.
    pub fn open(dir: &Path) -> EquinetResult<Self> {
        Ok(Self::new(load_snapshot(dir)?))
    }

    /// The snapshot new queries see. Holding the returned `Arc` keeps that
    /// snapshot alive across later swaps.
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// The snapshot replaced by the most recent swap, if any.
    pub fn previous(&self) -> Option<Arc<Snapshot>> {
        self.previous.load_full()
    }

    /// Install `snapshot` and return the one it replaced.
    pub fn swap(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.install(Arc::new(snapshot))
    }

    /// Load and verify a snapshot directory, then swap it in.
    ///
    /// On any load error the current snapshot stays active and the error is
    /// returned.
    pub fn reload_from(&self, dir: &Path) -> EquinetResult<Arc<Snapshot>> {
        let snapshot = match load_snapshot(dir) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                events::snapshot_rejected(&dir.display().to_string(), &e.to_string());
                return Err(e);
            }
        };
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.install(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Reject the snapshot `snapshot_id` and restore the previous one.
    ///
    /// Returns `false` (changing nothing) when `snapshot_id` is no longer
    /// current or there is no previous snapshot to restore.
    pub fn reject(&self, snapshot_id: &str, reason: &str) -> bool {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.current.load_full();
        if current.id() != snapshot_id {
            return false;
        }
        let Some(previous) = self.previous.swap(None) else {
            events::snapshot_rejected(snapshot_id, reason);
            return false;
        };
        self.current.store(Arc::clone(&previous));
        events::snapshot_rolled_back(snapshot_id, previous.id(), reason);
        true
    }

    fn install(&self, snapshot: Arc<Snapshot>) -> Arc<Snapshot> {
        let old = self.current.swap(Arc::clone(&snapshot));
        self.previous.store(Some(Arc::clone(&old)));
        events::snapshot_swapped(old.id(), snapshot.id(), snapshot.len());
        old
    }
}

impl std::fmt::Debug for SnapshotHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.load();
        f.debug_struct("SnapshotHandle")
            .field("current", &current.id())
            .field("records", &current.len())
            .finish()
    }
}
