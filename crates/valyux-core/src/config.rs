use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_score = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value: f64 = parse_as(var, &or_default(var, default))?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a finite non-negative number, got {value}"),
            })
        }
    };

    let env = parse_environment(&or_default("VALYUX_ENV", "development"))?;
    let bind_addr: SocketAddr =
        parse_as("VALYUX_BIND_ADDR", &or_default("VALYUX_BIND_ADDR", "0.0.0.0:5000"))?;
    let log_level = or_default("VALYUX_LOG_LEVEL", "info");
    let frontend_url = or_default("VALYUX_FRONTEND_URL", "http://localhost:1234");
    let default_location = or_default("VALYUX_DEFAULT_LOCATION", "Delhi");

    let cache_ttl_secs: u64 = parse_as(
        "VALYUX_CACHE_TTL_SECS",
        &or_default("VALYUX_CACHE_TTL_SECS", "600"),
    )?;
    let cache_sweep_secs: u64 = parse_as(
        "VALYUX_CACHE_SWEEP_SECS",
        &or_default("VALYUX_CACHE_SWEEP_SECS", "120"),
    )?;
    if cache_sweep_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VALYUX_CACHE_SWEEP_SECS".to_string(),
            reason: "sweep period must be at least 1 second".to_string(),
        });
    }

    let provider_base_url = or_default("FOODSPARK_API_URL", "https://api.foodspark.in/v1");
    let provider_api_key = lookup("FOODSPARK_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let provider_timeout_secs: u64 = parse_as(
        "VALYUX_PROVIDER_TIMEOUT_SECS",
        &or_default("VALYUX_PROVIDER_TIMEOUT_SECS", "15"),
    )?;
    let provider_limit: u32 = parse_as(
        "VALYUX_PROVIDER_LIMIT",
        &or_default("VALYUX_PROVIDER_LIMIT", "20"),
    )?;

    let match_threshold = parse_score("VALYUX_MATCH_THRESHOLD", "0.55")?;
    let match_quantity_bonus = parse_score("VALYUX_MATCH_QUANTITY_BONUS", "0.15")?;
    let match_brand_bonus = parse_score("VALYUX_MATCH_BRAND_BONUS", "0.10")?;

    let rate_limit_per_minute: usize = parse_as(
        "VALYUX_RATE_LIMIT_PER_MINUTE",
        &or_default("VALYUX_RATE_LIMIT_PER_MINUTE", "120"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        frontend_url,
        default_location,
        cache_ttl_secs,
        cache_sweep_secs,
        provider_base_url,
        provider_api_key,
        provider_timeout_secs,
        provider_limit,
        match_threshold,
        match_quantity_bonus,
        match_brand_bonus,
        rate_limit_per_minute,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VALYUX_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
