//! HTTP plumbing around the allocation and tax-allowance engines.

pub mod optimize_routes;
pub mod tax_routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dca_core::DcaError;
use market_data::HttpQuoteClient;
use serde::Serialize;
use std::sync::Arc;
use tax_allowance::{QuoteSource, TaxAllowanceParameters, TaxError};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<dyn QuoteSource>,
    pub tax_parameters: TaxAllowanceParameters,
}

/// Uniform response envelope.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

pub enum AppError {
    UnprocessableEntity(String),
    BadGateway(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::UnprocessableEntity(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            AppError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
        };
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DcaError> for AppError {
    fn from(error: DcaError) -> Self {
        AppError::UnprocessableEntity(error.to_string())
    }
}

impl From<TaxError> for AppError {
    fn from(error: TaxError) -> Self {
        match error {
            TaxError::MissingBuyHistory(_) => {
                AppError::UnprocessableEntity(error.to_string())
            }
            TaxError::QuoteLookup(_) => AppError::BadGateway(error.to_string()),
        }
    }
}

pub struct ServerConfig {
    pub bind_address: String,
    pub market_data_api_key: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            market_data_api_key: std::env::var("MARKET_DATA_API_KEY").unwrap_or_default(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(optimize_routes::optimize_routes())
        .merge(tax_routes::tax_routes())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

pub async fn run_server() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    let state = AppState {
        quotes: Arc::new(HttpQuoteClient::new(config.market_data_api_key.clone())),
        tax_parameters: TaxAllowanceParameters::from_env(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("listening on {}", config.bind_address);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
