use std::net::SocketAddr;
use std::time::Duration;

use crate::window::RefreshWindow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Tap-list feed, grouped into the brewery catalog.
    pub brewery_feed_url: String,
    /// Menu feed, flattened into the product catalog.
    pub product_feed_url: String,
    pub request_timeout_secs: u64,
    /// Sent on every feed request; the upstream rejects non-browser agents.
    pub user_agent: String,
    pub refresh_window: RefreshWindow,
    pub refresh_interval: Duration,
}
