pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::FeedClient;
pub use error::ScraperError;
pub use normalize::{normalize_brewery_records, normalize_product_records};
pub use types::FeedRecord;
