use std::sync::Arc;

use crate::auth::PlaceholderAuthorizer;
use crate::chat::{ChatRelay, CompletionModel, GeminiClient};
use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::github::GitHubClient;
use crate::navigation::Navigator;

/// Everything the route handlers share. Immutable apart from the navigator's
/// generation counter, which is bumped on shutdown to stop in-flight walks.
pub struct ApiState {
    pub github: GitHubClient,
    pub relay: ChatRelay,
    pub auth: PlaceholderAuthorizer,
    pub navigator: Navigator,
}

pub type SharedState = Arc<ApiState>;

impl ApiState {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let gemini = GeminiClient::new(settings).map_err(|e| AppError::Internal(e.to_string()))?;
        Self::with_model(settings, Arc::new(gemini))
    }

    /// Build with an explicit completion model.
    pub fn with_model(settings: &Settings, model: Arc<dyn CompletionModel>) -> Result<Self> {
        Ok(Self {
            github: GitHubClient::new(settings)?,
            relay: ChatRelay::new(model).require_file_context(settings.require_file_content),
            auth: PlaceholderAuthorizer::new(settings.github_client_id.clone()),
            navigator: Navigator::new(),
        })
    }
}
