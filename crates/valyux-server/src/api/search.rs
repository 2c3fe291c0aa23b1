use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use valyux_core::SearchResponse;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const MIN_QUERY_CHARS: usize = 2;
const MAX_QUERY_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    pub q: Option<String>,
    pub location: Option<String>,
}

/// Responds with the bare [`SearchResponse`], without the `data` envelope.
pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = validate_query(params.q.as_deref())
        .map_err(|msg| ApiError::validation(req_id.0.clone(), msg))?;
    let locality = params
        .location
        .as_deref()
        .map(str::trim)
        .filter(|loc| !loc.is_empty())
        .unwrap_or(&*state.default_location);

    let response = state.search.search(query, locality).await;
    tracing::info!(
        request_id = %req_id.0,
        query,
        locality,
        cached = response.meta.cached,
        results = response.meta.total_results,
        "search request served"
    );
    Ok(Json(response))
}

/// Trims the raw `q` parameter and checks its length in characters.
fn validate_query(raw: Option<&str>) -> Result<&str, String> {
    let query = raw.map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err("Missing required query parameter: q".to_string());
    }
    let chars = query.chars().count();
    if chars < MIN_QUERY_CHARS {
        return Err(format!("Query must be at least {MIN_QUERY_CHARS} characters"));
    }
    if chars > MAX_QUERY_CHARS {
        return Err(format!("Query must be at most {MAX_QUERY_CHARS} characters"));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_query_trims_and_bounds_length() {
        assert_eq!(validate_query(Some("  milk ")), Ok("milk"));
        assert_eq!(validate_query(Some("ab")), Ok("ab"));
        assert!(validate_query(Some("a")).is_err());
        assert!(validate_query(Some(&"x".repeat(101))).is_err());
        assert!(validate_query(Some(&"x".repeat(100))).is_ok());
    }

    #[test]
    fn validate_query_reports_missing_parameter() {
        assert_eq!(
            validate_query(None),
            Err("Missing required query parameter: q".to_string())
        );
        assert_eq!(
            validate_query(Some("   ")),
            Err("Missing required query parameter: q".to_string())
        );
    }

    #[test]
    fn validate_query_counts_characters_not_bytes() {
        assert_eq!(validate_query(Some("दूध")), Ok("दूध"));
        assert!(validate_query(Some(&"दू".repeat(40))).is_ok());
    }
}
