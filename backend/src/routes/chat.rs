//! Chat relay endpoint.
//!
//! - POST /api/chat { body: string, fileContent?: string }
//!   Relays the question plus file context to the model.
//!   200 { output } | 400 { error } | 500 { error, details }
//!
//! - OPTIONS /api/chat
//!   Pre-flight: 204 with an empty body.
//!
//! Every response from this router carries the same permissive CORS headers,
//! so the global `CorsLayer` is not applied here.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{
        HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    routing::post,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::{AppError, Result};
use crate::models::{ChatRequest, ChatResponse};
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/chat", post(chat).options(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn chat(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let body = request.body.unwrap_or_default();
    let file_content = request.file_content.unwrap_or_default();

    let output = state.relay.relay(&body, &file_content).await?;
    Ok(Json(ChatResponse { output }))
}
