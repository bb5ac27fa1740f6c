pub mod app_config;
pub mod catalog;
pub mod config;
pub mod window;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    BreweryCatalog, BreweryGroup, FeedScalar, PriceTier, ProductCatalog, ProductEntry,
    ProductSummary, SelectedValue, Snapshot,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use window::RefreshWindow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
