//! Where a refresh gets its catalogs from.

use std::future::Future;

use taplist_core::{BreweryCatalog, ProductCatalog};
use taplist_scraper::{FeedClient, ScraperError};

/// The two upstream feeds a refresh pulls from.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch_breweries(&self) -> impl Future<Output = Result<BreweryCatalog, ScraperError>> + Send;

    fn fetch_products(&self) -> impl Future<Output = Result<ProductCatalog, ScraperError>> + Send;
}

/// The store's real HTTP feeds.
#[derive(Debug, Clone)]
pub struct LiveFeeds {
    client: FeedClient,
    brewery_url: String,
    product_url: String,
}

impl LiveFeeds {
    #[must_use]
    pub fn new(client: FeedClient, brewery_url: String, product_url: String) -> Self {
        Self {
            client,
            brewery_url,
            product_url,
        }
    }
}

impl SnapshotSource for LiveFeeds {
    async fn fetch_breweries(&self) -> Result<BreweryCatalog, ScraperError> {
        self.client.fetch_brewery_catalog(&self.brewery_url).await
    }

    async fn fetch_products(&self) -> Result<ProductCatalog, ScraperError> {
        self.client.fetch_product_catalog(&self.product_url).await
    }
}
