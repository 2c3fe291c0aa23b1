mod api;
mod middleware;

use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;
use valyux_provider::{ProviderClient, ProviderConfig};
use valyux_search::{MatchConfig, SearchCache, SearchService};

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = valyux_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting valyux server");

    let provider = ProviderClient::new(&ProviderConfig::from_app_config(&config))?;
    let cache = Arc::new(SearchCache::new(Duration::from_secs(config.cache_ttl_secs)));
    let _sweeper = cache.spawn_sweeper(Duration::from_secs(config.cache_sweep_secs));
    let search = SearchService::new(provider, cache, MatchConfig::from_app_config(&config));

    let state = AppState {
        search: Arc::new(search),
        default_location: Arc::from(config.default_location.as_str()),
        advisor: None,
    };
    let app = build_app(
        state,
        RateLimitState::per_minute(config.rate_limit_per_minute),
        &config.frontend_url,
    )?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
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
