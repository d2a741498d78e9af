//! Sign-in stub.
//!
//! `PlaceholderAuthorizer` accepts any credentials and returns one fixed user.
//! It is not authentication and must not ship to production.

use crate::models::{Credentials, ProviderInfo, SessionUser};

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

#[derive(Debug, Clone, Default)]
pub struct PlaceholderAuthorizer {
    github_client_id: Option<String>,
}

impl PlaceholderAuthorizer {
    pub fn new(github_client_id: Option<String>) -> Self {
        Self { github_client_id }
    }

    pub fn authorize(&self, credentials: &Credentials) -> SessionUser {
        tracing::warn!(
            target: "auth",
            username = %credentials.username,
            "placeholder authorizer accepted credentials without checking them"
        );
        SessionUser {
            id: "user1".to_string(),
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
        }
    }

    pub fn providers(&self) -> Vec<ProviderInfo> {
        let mut providers = vec![ProviderInfo {
            id: "credentials".to_string(),
            name: "Credentials".to_string(),
            authorize_url: None,
        }];

        if let Some(client_id) = &self.github_client_id {
            providers.push(ProviderInfo {
                id: "github".to_string(),
                name: "GitHub".to_string(),
                authorize_url: Some(format!("{}?client_id={}", GITHUB_AUTHORIZE_URL, client_id)),
            });
        }

        providers
    }
}
