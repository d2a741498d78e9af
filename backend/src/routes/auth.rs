//! Sign-in endpoints backed by the placeholder authorizer.
//!
//! - GET /api/auth/providers
//! - POST /api/auth/callback/credentials { username, password } → { user }

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::models::{Credentials, ProviderInfo};
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/auth/providers", get(list_providers))
        .route("/api/auth/callback/credentials", post(sign_in))
        .with_state(state)
}

async fn list_providers(State(state): State<SharedState>) -> Json<Vec<ProviderInfo>> {
    Json(state.auth.providers())
}

async fn sign_in(State(state): State<SharedState>, Json(credentials): Json<Credentials>) -> Json<Value> {
    let user = state.auth.authorize(&credentials);
    Json(json!({ "user": user }))
}
