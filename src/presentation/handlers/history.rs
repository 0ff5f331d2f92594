use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::domain::ChatExchange;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct HistoryRequest {
    pub input_text: String,
    pub output_text: String,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub id: i64,
    pub title: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Registered for every method; anything but POST gets the same 400 body
/// the endpoint has always returned.
#[tracing::instrument(skip(state, body))]
pub async fn history_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> impl IntoResponse {
    if method != Method::POST {
        tracing::warn!(method = %method, "History request with unsupported method");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid request method".to_string(),
            }),
        )
            .into_response();
    }

    let request: HistoryRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed history request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid request body: {}", e),
                }),
            )
                .into_response();
        }
    };

    let exchange = ChatExchange::new(request.input_text, request.output_text);

    match state.history_repository.create(&exchange).await {
        Ok(record) => {
            tracing::info!(id = record.id, "Chat exchange recorded");
            (
                StatusCode::OK,
                Json(HistoryResponse {
                    id: record.id,
                    title: record.title,
                    timestamp: record.created_at.to_rfc3339(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist chat exchange");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to record exchange: {}", e),
                }),
            )
                .into_response()
        }
    }
}
