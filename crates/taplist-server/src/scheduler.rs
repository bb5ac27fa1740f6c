//! Background refresh scheduler.
//!
//! Wraps a [`JobScheduler`] running one repeated job that ticks the
//! [`RefreshEngine`] on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::refresh::{RefreshEngine, RefreshOutcome, SnapshotSource};

/// Handle to the running refresh job. Call [`RefreshScheduler::stop`] before
/// the process exits.
pub struct RefreshScheduler {
    inner: JobScheduler,
}

impl RefreshScheduler {
    /// Registers the repeated refresh job and starts the scheduler.
    ///
    /// The first scheduled tick fires one `interval` after start; the caller
    /// is expected to have run the startup tick already.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
    /// the job cannot be registered, or the scheduler fails to start.
    pub async fn start<S: SnapshotSource>(
        engine: Arc<RefreshEngine<S>>,
        interval: Duration,
    ) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let engine = Arc::clone(&engine);
            Box::pin(async move {
                run_tick(&engine).await;
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;
        tracing::info!(
            interval_secs = interval.as_secs(),
            "scheduler: registered refresh job"
        );
        Ok(Self { inner: scheduler })
    }

    /// Stops the scheduler; no tick is started after this returns.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the scheduler fails to shut down.
    pub async fn stop(mut self) -> Result<(), JobSchedulerError> {
        self.inner.shutdown().await?;
        tracing::info!("scheduler: refresh job stopped");
        Ok(())
    }
}

/// Ticks `engine` at the current local time and logs the outcome.
///
/// Errors are logged, never propagated: a failed tick leaves the previous
/// snapshot in place and the next tick retries.
pub async fn run_tick<S: SnapshotSource>(engine: &RefreshEngine<S>) -> Option<RefreshOutcome> {
    let now = Local::now().fixed_offset();
    match engine.tick(now).await {
        Ok(RefreshOutcome::Refreshed { modified }) => {
            tracing::info!(at = %now, modified, "refresh: snapshot updated");
            Some(RefreshOutcome::Refreshed { modified })
        }
        Ok(RefreshOutcome::OutsideWindow) => {
            tracing::info!(
                at = %now,
                window = %engine.window(),
                "refresh: outside refresh window; skipping"
            );
            Some(RefreshOutcome::OutsideWindow)
        }
        Ok(RefreshOutcome::Busy) => {
            tracing::warn!(at = %now, "refresh: previous tick still running; skipping");
            Some(RefreshOutcome::Busy)
        }
        Err(e) => {
            tracing::warn!(
                at = %now,
                feed = %e.feed,
                status = e.source.status(),
                error = %e,
                "refresh: tick failed; keeping previous snapshot"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use taplist_core::{BreweryCatalog, ProductCatalog, RefreshWindow};
    use taplist_scraper::ScraperError;

    use super::*;

    struct CountingFeeds {
        calls: Arc<AtomicUsize>,
    }

    impl SnapshotSource for CountingFeeds {
        async fn fetch_breweries(&self) -> Result<BreweryCatalog, ScraperError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(BreweryCatalog::new())
        }

        async fn fetch_products(&self) -> Result<ProductCatalog, ScraperError> {
            Ok(Vec::new())
        }
    }

    struct FailingFeeds;

    impl SnapshotSource for FailingFeeds {
        async fn fetch_breweries(&self) -> Result<BreweryCatalog, ScraperError> {
            Err(ScraperError::UpstreamUnavailable {
                status: 500,
                url: "http://fake.invalid/hsys".to_string(),
            })
        }

        async fn fetch_products(&self) -> Result<ProductCatalog, ScraperError> {
            Ok(Vec::new())
        }
    }

    /// Wraps past midnight so every instant of the day is inside.
    fn always_open() -> RefreshWindow {
        use chrono::NaiveTime;
        RefreshWindow::new(
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            NaiveTime::from_hms_nano_opt(11, 59, 59, 999_999_999).unwrap(),
        )
    }

    #[tokio::test]
    async fn run_tick_swallows_feed_errors() {
        let engine = RefreshEngine::new(FailingFeeds, always_open());
        assert_eq!(run_tick(&engine).await, None);
        assert!(engine.store().load().snapshot.is_none());
    }

    #[tokio::test]
    async fn run_tick_reports_refresh_inside_window() {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = RefreshEngine::new(
            CountingFeeds {
                calls: Arc::clone(&calls),
            },
            always_open(),
        );
        let outcome = run_tick(&engine).await;
        assert!(matches!(outcome, Some(RefreshOutcome::Refreshed { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn scheduler_ticks_repeatedly_and_stops_cleanly() {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = Arc::new(RefreshEngine::new(
            CountingFeeds {
                calls: Arc::clone(&calls),
            },
            always_open(),
        ));

        let scheduler = RefreshScheduler::start(Arc::clone(&engine), Duration::from_secs(1))
            .await
            .expect("start scheduler");
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        scheduler.stop().await.expect("stop scheduler");

        let fired = calls.load(Ordering::SeqCst);
        assert!(fired >= 1, "expected at least one scheduled tick, got {fired}");

        // A tick already dispatched when stop began may still land.
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let after = calls.load(Ordering::SeqCst);
        assert!(
            after <= fired + 1,
            "ticks kept firing after stop: {fired} before, {after} after"
        );
    }
}
