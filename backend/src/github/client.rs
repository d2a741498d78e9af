use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::models::{ContentEntry, RepositorySummary, UserProfile};

/// Read-only client for the GitHub REST API and the raw content host.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    raw_url: String,
    branch: String,
    token: Option<String>,
}

/// The contents API answers with an array for directories and an object for files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("repo-chat/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            http,
            api_url: settings.github_api_url.clone(),
            raw_url: settings.github_raw_url.clone(),
            branch: settings.github_branch.clone(),
            token: settings.github_token.clone(),
        })
    }

    /// Single-level listing of `path` (repository root when empty).
    pub async fn list_contents(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<ContentEntry>> {
        validate_repo(owner, repo)?;

        let url = endpoint(&self.api_url, &["repos", owner, repo, "contents", path])?;
        let what = format!("{}/{}/{}", owner, repo, path);
        let response = self.send(self.api_get(url), &what).await?;

        match response.json::<ContentsResponse>().await? {
            ContentsResponse::Listing(entries) => Ok(entries),
            ContentsResponse::Single(entry) => {
                Err(AppError::Validation(format!("{} is not a directory", entry.path)))
            }
        }
    }

    /// Raw text of a file on the configured branch.
    pub async fn fetch_file_content(&self, owner: &str, repo: &str, path: &str) -> Result<String> {
        validate_repo(owner, repo)?;
        if path.trim().is_empty() {
            return Err(AppError::Validation("File path is required".to_string()));
        }

        let url = endpoint(&self.raw_url, &[owner, repo, &self.branch, path])?;
        let what = format!("{}/{}/{}", owner, repo, path);
        let response = self.send(self.authorized(self.http.get(url)), &what).await?;

        Ok(response.text().await?)
    }

    pub async fn get_user(&self, username: &str) -> Result<UserProfile> {
        validate_username(username)?;
        let url = endpoint(&self.api_url, &["users", username])?;
        let response = self.send(self.api_get(url), username).await?;
        Ok(response.json().await?)
    }

    pub async fn list_user_repos(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        validate_username(username)?;
        let url = endpoint(&self.api_url, &["users", username, "repos"])?;
        let response = self.send(self.api_get(url), username).await?;
        Ok(response.json().await?)
    }

    fn api_get(&self, url: Url) -> RequestBuilder {
        self.authorized(self.http.get(url).header(ACCEPT, "application/vnd.github+json"))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(target: "github", error = %e, "request for {} failed", what);
            AppError::Upstream(format!("GitHub request failed: {}", e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(target: "github", %status, "request for {} rejected", what);
            return Err(AppError::Upstream(format!("GitHub returned {} for {}: {}", status, what, text)));
        }

        tracing::debug!(target: "github", %status, "fetched {}", what);
        Ok(response)
    }
}

fn validate_repo(owner: &str, repo: &str) -> Result<()> {
    if owner.trim().is_empty() || repo.trim().is_empty() {
        return Err(AppError::Validation("Owner and repository name are required".to_string()));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Please enter a username".to_string()));
    }
    Ok(())
}

/// Append path segments to `base`, splitting repository paths on `/` and
/// percent-encoding each piece.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| AppError::Internal(format!("Invalid base URL {}: {}", base, e)))?;
    {
        let mut parts = url
            .path_segments_mut()
            .map_err(|_| AppError::Internal(format!("Base URL cannot hold a path: {}", base)))?;
        parts.pop_if_empty();
        for segment in segments {
            for piece in segment.split('/').filter(|p| !p.is_empty()) {
                parts.push(piece);
            }
        }
    }
    Ok(url)
}
