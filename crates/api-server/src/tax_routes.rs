//! Tax allowance endpoint: recommend lots to sell against the allowance.

use crate::{ApiResponse, AppError, AppState};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tax_allowance::{find_sell_candidates, TickerShares, Transaction};

#[derive(Deserialize)]
pub struct SellCandidatesRequest {
    pub transactions: Vec<Transaction>,
}

#[derive(Serialize)]
pub struct SellCandidatesResponse {
    pub candidates: Vec<TickerShares>,
}

pub fn tax_routes() -> Router<AppState> {
    Router::new().route("/api/tax/sell-candidates", post(sell_candidates))
}

async fn sell_candidates(
    State(state): State<AppState>,
    Json(request): Json<SellCandidatesRequest>,
) -> Result<Json<ApiResponse<SellCandidatesResponse>>, AppError> {
    let candidates = find_sell_candidates(
        &request.transactions,
        state.quotes.as_ref(),
        &state.tax_parameters,
    )
    .await?;
    Ok(Json(ApiResponse::success(SellCandidatesResponse {
        candidates,
    })))
}
