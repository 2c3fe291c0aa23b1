mod cart;
mod search;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use valyux_core::CartAdvisor;
use valyux_provider::ProviderClient;
use valyux_search::{CacheStats, SearchService};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService<ProviderClient>>,
    /// Locality used when a search omits `location`.
    pub default_location: Arc<str>,
    /// External cart advisor; `None` means cart analysis is always computed locally.
    pub advisor: Option<Arc<dyn CartAdvisor>>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    provider: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    pub(super) fn validation(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "validation_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// CORS limited to the frontend origin.
///
/// # Errors
///
/// Returns an error if `frontend_url` is not a valid header value.
fn build_cors(frontend_url: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/'))
        .map_err(|e| anyhow::anyhow!("invalid frontend URL {frontend_url:?}: {e}"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")]))
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/search", get(search::search_products))
        .route("/api/cache-stats", get(cache_stats))
        .route("/api/cart/analyze", post(cart::analyze))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

/// Assembles the router with CORS, tracing, and request-id layers.
///
/// # Errors
///
/// Returns an error if the CORS origin cannot be built from `frontend_url`.
pub fn build_app(
    state: AppState,
    rate_limit: RateLimitState,
    frontend_url: &str,
) -> anyhow::Result<Router> {
    let public_routes = Router::new().route("/api/health", get(health));

    Ok(Router::new()
        .merge(public_routes)
        .merge(api_router(rate_limit))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors(frontend_url)?),
        )
        .with_state(state))
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HealthData>> {
    let provider = if state.search.source().is_offline() {
        "offline"
    } else {
        "live"
    };
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            provider,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

async fn cache_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<CacheStats>> {
    Json(ApiResponse {
        data: state.search.cache().stats(),
        meta: ResponseMeta::new(req_id.0),
    })
}

async fn not_found(Extension(req_id): Extension<RequestId>) -> ApiError {
    ApiError::new(req_id.0, "not_found", "route not found")
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
