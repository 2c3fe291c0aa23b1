use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use valyux_core::{analyze_cart, CartAnalysis, CartItem};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CartRequest {
    pub items: Vec<CartItem>,
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CartAnalysis>>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::validation(
            req_id.0.clone(),
            format!("invalid cart body: {}", rejection.body_text()),
        )
    })?;

    if request.items.is_empty() {
        return Err(ApiError::validation(
            req_id.0,
            "Cart must contain at least one item",
        ));
    }
    if let Some(item) = request.items.iter().find(|item| item.quantity == 0) {
        return Err(ApiError::validation(
            req_id.0,
            format!("Quantity for \"{}\" must be at least 1", item.product.name),
        ));
    }

    let analysis = analyze_cart(state.advisor.as_deref(), &request.items).await;
    tracing::info!(
        request_id = %req_id.0,
        items = request.items.len(),
        cheapest = %analysis.cheapest_single_source_total.source,
        "cart analyzed"
    );

    Ok(Json(ApiResponse {
        data: analysis,
        meta: ResponseMeta::new(req_id.0),
    }))
}
