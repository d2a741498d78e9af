//! Repository browsing endpoints.
//!
//! - GET /api/v1/repos/{owner}/{repo}/contents?path=
//!   Single-level listing in API order. Used by: FileList view
//!
//! - GET /api/v1/repos/{owner}/{repo}/tree?path=
//!   Full recursive walk; failed nested directories are reported in `errors`.
//!   Used by: FileTree in the chat sidebar
//!
//! - GET /api/v1/repos/{owner}/{repo}/file?path=
//!   Raw file text as a JSON string. Used by: file viewer, chat context

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{ContentEntry, TreeWalk};
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/repos/{owner}/{repo}/contents", get(get_contents))
        .route("/api/v1/repos/{owner}/{repo}/tree", get(get_tree))
        .route("/api/v1/repos/{owner}/{repo}/file", get(get_file_content))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PathQuery {
    path: Option<String>,
}

async fn get_contents(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<PathQuery>,
) -> Result<Json<Vec<ContentEntry>>> {
    let entries = state
        .github
        .list_contents(&owner, &repo, query.path.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(entries))
}

async fn get_tree(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<PathQuery>,
) -> Result<Json<TreeWalk>> {
    let ticket = state.navigator.current();
    let walk = state
        .github
        .fetch_tree(&owner, &repo, query.path.as_deref().unwrap_or(""), &ticket)
        .await?;
    Ok(Json(walk))
}

#[derive(Debug, Deserialize)]
struct FileQuery {
    path: String,
}

async fn get_file_content(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    query: std::result::Result<Query<FileQuery>, QueryRejection>,
) -> Result<Json<String>> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let content = state
        .github
        .fetch_file_content(&owner, &repo, &query.path)
        .await?;
    Ok(Json(content))
}
