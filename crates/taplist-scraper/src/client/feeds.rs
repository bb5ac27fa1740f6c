//! Per-feed fetch entry points for `FeedClient`.

use taplist_core::{BreweryCatalog, ProductCatalog};

use crate::error::ScraperError;
use crate::normalize::{normalize_brewery_records, normalize_product_records};

use super::FeedClient;

impl FeedClient {
    /// Fetches the tap-list feed and groups it into a [`BreweryCatalog`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_records`].
    pub async fn fetch_brewery_catalog(&self, url: &str) -> Result<BreweryCatalog, ScraperError> {
        let records = self.fetch_records(url).await?;
        let catalog = normalize_brewery_records(&records);
        tracing::debug!(
            url,
            records = records.len(),
            breweries = catalog.len(),
            "fetched brewery feed"
        );
        Ok(catalog)
    }

    /// Fetches the menu feed and flattens it into a [`ProductCatalog`].
    ///
    /// Unreadable embedded candidate lists never fail the fetch; the
    /// affected products fall back to "not available".
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_records`].
    pub async fn fetch_product_catalog(&self, url: &str) -> Result<ProductCatalog, ScraperError> {
        let records = self.fetch_records(url).await?;
        let catalog = normalize_product_records(&records);
        tracing::debug!(url, products = catalog.len(), "fetched product feed");
        Ok(catalog)
    }
}
