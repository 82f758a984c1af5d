//! Allocation endpoint: turn a request body into a distribution.

use crate::{ApiResponse, AppError, AppState};
use axum::routing::post;
use axum::{Json, Router};
use dca_core::{DcaRequest, Distribution};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct OptimizeResponse {
    pub distribution: Distribution,
}

pub fn optimize_routes() -> Router<AppState> {
    Router::new().route("/api/optimize", post(optimize))
}

async fn optimize(
    Json(request): Json<DcaRequest>,
) -> Result<Json<ApiResponse<OptimizeResponse>>, AppError> {
    if request.assets.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "assets must not be empty".to_string(),
        ));
    }
    if request.amount <= Decimal::ZERO {
        return Err(AppError::UnprocessableEntity(
            "amount must be positive".to_string(),
        ));
    }

    let distribution = allocation_engine::optimize(&request)?;
    Ok(Json(ApiResponse::success(OptimizeResponse { distribution })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tax_allowance::{QuoteSource, TaxAllowanceParameters, TaxError};
    use tower::ServiceExt;

    struct NoQuotes;

    #[async_trait::async_trait]
    impl QuoteSource for NoQuotes {
        async fn get_quotes(
            &self,
            _tickers: &HashSet<String>,
        ) -> Result<HashMap<String, Decimal>, TaxError> {
            Ok(HashMap::new())
        }
    }

    fn app() -> Router {
        crate::router(crate::AppState {
            quotes: Arc::new(NoQuotes),
            tax_parameters: TaxAllowanceParameters::default(),
        })
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn optimizes_a_minimal_request() {
        let body = r#"{
            "amount": 1000.00,
            "assets": [{ "ticker": "BTC", "weight": 50.0, "target": 70.0 }]
        }"#;

        let (status, json) = post_json(app(), "/api/optimize", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        // Decimal values travel as strings on the wire.
        let allocated: Decimal = json["data"]["distribution"]["BTC"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(allocated, rust_decimal_macros::dec!(1000));
    }

    #[tokio::test]
    async fn empty_asset_list_is_unprocessable() {
        let body = r#"{ "amount": 1000.00, "assets": [] }"#;
        let (status, json) = post_json(app(), "/api/optimize", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn unknown_strategy_type_is_rejected() {
        let body = r#"{
            "amount": 1000.00,
            "strategy": { "type": "MOMENTUM" },
            "assets": [{ "ticker": "BTC", "weight": 50.0, "target": 70.0 }]
        }"#;
        let (status, _) = post_json(app(), "/api/optimize", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn placeholder_strategy_reports_unsupported() {
        let body = r#"{
            "amount": 1000.00,
            "strategy": { "type": "DIVIDEND" },
            "assets": [{ "ticker": "BTC", "weight": 50.0, "target": 70.0 }]
        }"#;
        let (status, json) = post_json(app(), "/api/optimize", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Unsupported strategy"));
    }
}
