//! GitHub user search.
//!
//! - GET /api/v1/users/{username}        profile card
//! - GET /api/v1/users/{username}/repos  repository list

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::error::Result;
use crate::models::{RepositorySummary, UserProfile};
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/users/{username}", get(get_user))
        .route("/api/v1/users/{username}/repos", get(list_repos))
        .with_state(state)
}

async fn get_user(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>> {
    Ok(Json(state.github.get_user(&username).await?))
}

async fn list_repos(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<RepositorySummary>>> {
    Ok(Json(state.github.list_user_repos(&username).await?))
}
