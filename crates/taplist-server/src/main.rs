mod api;
mod middleware;
mod refresh;
mod scheduler;

use std::sync::Arc;

use taplist_scraper::FeedClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    refresh::{LiveFeeds, RefreshEngine},
    scheduler::RefreshScheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = taplist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        window = %config.refresh_window,
        interval_secs = config.refresh_interval.as_secs(),
        "starting taplist server"
    );

    let client = FeedClient::new(config.request_timeout_secs, &config.user_agent)?;
    let feeds = LiveFeeds::new(
        client,
        config.brewery_feed_url.clone(),
        config.product_feed_url.clone(),
    );
    let engine = Arc::new(RefreshEngine::new(feeds, config.refresh_window));

    // Startup refresh; still window-gated, and a failure only leaves the
    // catalogs empty until the next scheduled tick.
    scheduler::run_tick(&engine).await;

    let scheduler = RefreshScheduler::start(Arc::clone(&engine), config.refresh_interval).await?;

    let app = build_app(AppState {
        store: engine.store(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    scheduler.stop().await?;
    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
