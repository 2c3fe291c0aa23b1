pub mod app_config;
pub mod cart;
pub mod category;
pub mod config;
pub mod normalize;
pub mod platforms;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use cart::{
    analyze_cart, fallback_analysis, sanitize_analysis, AdvisorError, CartAdvisor, CartAnalysis,
    CartItem, SourceTotal,
};
pub use category::{classify, OTHER_CATEGORY};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::normalize;
pub use platforms::{Platform, PlatformMeta, DEFAULT_DELIVERY_TIME};
pub use products::{
    PlatformStatus, PriceEntry, RawListing, SearchMeta, SearchResponse, StatusMap, UnifiedProduct,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
