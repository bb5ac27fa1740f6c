//! HTTP client for the store's tap-list and menu feeds.

mod feeds;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::types::FeedRecord;

/// `Accept` header the upstream expects from its own storefront scripts.
pub(crate) const FEED_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// HTTP client for the upstream JSON feeds.
///
/// Issues exactly one GET per fetch. There is no retry: a failed fetch is
/// reported to the caller, which decides when to try again.
#[derive(Debug, Clone)]
pub struct FeedClient {
    pub(super) client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with the given request timeout and `User-Agent`.
    ///
    /// The upstream rejects non-browser agents, so `user_agent` should look
    /// like a real browser.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UpstreamUnreachable`] if the underlying
    /// `reqwest::Client` cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches a feed and returns its top-level array as records.
    ///
    /// Array elements that are not JSON objects are skipped with a warning.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UpstreamUnavailable`] — any non-2xx status.
    /// - [`ScraperError::UpstreamUnreachable`] — network, TLS or timeout failure.
    /// - [`ScraperError::Deserialize`] — body is not a JSON array.
    pub async fn fetch_records(&self, url: &str) -> Result<Vec<FeedRecord>, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, FEED_ACCEPT)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UpstreamUnavailable {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let items = serde_json::from_str::<Vec<serde_json::Value>>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("feed {url}"),
                source: e,
            }
        })?;

        let total = items.len();
        let records: Vec<FeedRecord> = items
            .into_iter()
            .filter_map(FeedRecord::from_value)
            .collect();

        if records.len() < total {
            tracing::warn!(
                url,
                skipped = total - records.len(),
                "feed contained non-object entries; skipped"
            );
        }

        Ok(records)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
