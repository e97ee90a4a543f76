//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use accounting_types::{AppError, Receipt, ReceiptRepository};
use exchange_rates::{ConvertError, ConvertRequest, RateClient};

use crate::ReceiptService;

/// Application state shared across handlers.
///
/// The receipt service and the rate client are independent components;
/// they only meet here because they share one HTTP process.
pub struct AppState<R: ReceiptRepository> {
    pub service: ReceiptService<R>,
    pub rates: RateClient,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Stores a receipt aggregate. Identifiers in the body are ignored.
#[tracing::instrument(skip(state, receipt))]
pub async fn create_invoice<R: ReceiptRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(receipt): Json<Receipt>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state.service.create_receipt(receipt).await?;

    let id = stored
        .id
        .ok_or_else(|| AppError::Internal("stored receipt has no identifier".into()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/invoices/{id}"))],
        Json(stored),
    ))
}

/// Lists every stored receipt with nested store/info/items/totals.
#[tracing::instrument(skip(state))]
pub async fn list_invoices<R: ReceiptRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let receipts = state.service.list_receipts().await?;
    Ok(Json(receipts))
}

/// Converts an amount between currencies via the rate provider.
///
/// 400 with `{error}` for invalid input or a provider-reported logical
/// rejection; 500 with `{error, details}` for transport or unexpected
/// failures.
#[tracing::instrument(skip(state, req))]
pub async fn convert<R: ReceiptRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<ConvertRequest>,
) -> Response {
    match state.rates.convert(req).await {
        Ok(conversion) => Json(conversion).into_response(),
        Err(ConvertError::InvalidRequest(msg)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": msg })),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "rate conversion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Error fetching exchange rates",
                    "details": err.to_string()
                })),
            )
                .into_response()
        }
    }
}
