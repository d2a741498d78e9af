//! API route handlers - maps HTTP endpoints to GitHub and model calls.
//!
//! Each submodule defines routes for a feature area:
//! - `users`: Profile and repository list for a GitHub user
//! - `repository`: Directory listing, full tree and file content
//! - `chat`: Chat relay (carries its own fixed CORS headers)
//! - `auth`: Sign-in provider listing and the placeholder credentials check
//! - `health`: Liveness probe

pub mod auth;
pub mod chat;
pub mod health;
pub mod repository;
pub mod users;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::SharedState;

pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(users::routes(state.clone()))
        .merge(repository::routes(state.clone()))
        .merge(auth::routes(state.clone()))
        .merge(health::routes())
        .layer(cors)
        .merge(chat::routes(state))
}
