//! Refresh-and-cache engine.
//!
//! A [`RefreshEngine`] owns the published catalogs and the update and
//! modification timestamps. Each [`RefreshEngine::tick`] is window-gated,
//! fetches both feeds, and publishes the pair as one new generation in the
//! [`SnapshotStore`]. Readers hold a `SnapshotStore` clone and never wait on
//! a fetch.

mod source;
mod store;

use chrono::{DateTime, FixedOffset};
use taplist_core::{RefreshWindow, Snapshot};
use taplist_scraper::ScraperError;
use thiserror::Error;
use tokio::sync::Mutex;

pub use source::{LiveFeeds, SnapshotSource};
pub use store::{Published, RefreshTimestamps, SnapshotStore};

/// Which upstream feed a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Breweries,
    Products,
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feed::Breweries => write!(f, "brewery"),
            Feed::Products => write!(f, "product"),
        }
    }
}

/// A tick that fetched but could not publish. Published state is untouched.
#[derive(Debug, Error)]
#[error("{feed} feed fetch failed: {source}")]
pub struct RefreshError {
    pub feed: Feed,
    #[source]
    pub source: ScraperError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// `now` was outside the refresh window; nothing was fetched.
    OutsideWindow,
    /// Another tick was still in flight; this one was skipped.
    Busy,
    /// A new generation was published.
    Refreshed { modified: bool },
}

pub struct RefreshEngine<S> {
    source: S,
    window: RefreshWindow,
    store: SnapshotStore,
    in_flight: Mutex<()>,
}

impl<S: SnapshotSource> RefreshEngine<S> {
    pub fn new(source: S, window: RefreshWindow) -> Self {
        Self {
            source,
            window,
            store: SnapshotStore::new(),
            in_flight: Mutex::new(()),
        }
    }

    /// Read handle onto the published state.
    pub fn store(&self) -> SnapshotStore {
        self.store.clone()
    }

    pub fn window(&self) -> RefreshWindow {
        self.window
    }

    /// Runs one refresh attempt as of `now`.
    ///
    /// Ticks never overlap: if one is already running this returns
    /// [`RefreshOutcome::Busy`] immediately. `lastModificationAt` moves only
    /// when the fetched pair differs from the published one.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] if either feed fails. Nothing is published in
    /// that case, not even the feed that succeeded.
    pub async fn tick(&self, now: DateTime<FixedOffset>) -> Result<RefreshOutcome, RefreshError> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            return Ok(RefreshOutcome::Busy);
        };

        if !self.window.contains(now.time()) {
            return Ok(RefreshOutcome::OutsideWindow);
        }

        let (breweries, products) =
            tokio::join!(self.source.fetch_breweries(), self.source.fetch_products());
        let breweries = breweries.map_err(|source| RefreshError {
            feed: Feed::Breweries,
            source,
        })?;
        let products = products.map_err(|source| RefreshError {
            feed: Feed::Products,
            source,
        })?;
        let fetched = Snapshot {
            breweries,
            products,
        };

        let previous = self.store.load();
        let modified = previous.snapshot.as_ref() != Some(&fetched);
        let timestamps = RefreshTimestamps {
            last_update_at: Some(now),
            last_modification_at: if modified {
                Some(now)
            } else {
                previous.timestamps.last_modification_at
            },
        };

        self.store.publish(Published {
            snapshot: Some(fetched),
            timestamps,
        });

        Ok(RefreshOutcome::Refreshed { modified })
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
