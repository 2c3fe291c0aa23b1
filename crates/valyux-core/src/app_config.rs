use std::net::SocketAddr;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub frontend_url: String,
    pub default_location: String,
    pub cache_ttl_secs: u64,
    pub cache_sweep_secs: u64,
    pub provider_base_url: String,
    /// `None` puts the provider in offline mode.
    pub provider_api_key: Option<String>,
    pub provider_timeout_secs: u64,
    pub provider_limit: u32,
    pub match_threshold: f64,
    pub match_quantity_bonus: f64,
    pub match_brand_bonus: f64,
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("frontend_url", &self.frontend_url)
            .field("default_location", &self.default_location)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("cache_sweep_secs", &self.cache_sweep_secs)
            .field("provider_base_url", &self.provider_base_url)
            .field(
                "provider_api_key",
                &self.provider_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("provider_limit", &self.provider_limit)
            .field("match_threshold", &self.match_threshold)
            .field("match_quantity_bonus", &self.match_quantity_bonus)
            .field("match_brand_bonus", &self.match_brand_bonus)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
