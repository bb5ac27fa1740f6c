//! Published catalog state shared between the refresh engine and readers.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use taplist_core::Snapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshTimestamps {
    /// Last successful in-window refresh, whether or not data changed.
    pub last_update_at: Option<DateTime<FixedOffset>>,
    /// Last refresh whose data differed from the previous snapshot.
    pub last_modification_at: Option<DateTime<FixedOffset>>,
}

/// One immutable generation of published state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Published {
    /// `None` until the first successful refresh.
    pub snapshot: Option<Snapshot>,
    pub timestamps: RefreshTimestamps,
}

/// Single-writer, many-reader cell holding the current [`Published`] state.
///
/// Readers clone an `Arc` under a read lock and never see a half-written
/// generation; the writer replaces the whole `Arc` under a write lock, so the
/// lock is only ever held for a pointer copy.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<Published>>>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current generation.
    #[must_use]
    pub fn load(&self) -> Arc<Published> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the current generation with `next`.
    pub(super) fn publish(&self, next: Published) {
        let next = Arc::new(next);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }
}
