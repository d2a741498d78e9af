//! Runtime settings, parsed from flags with environment-variable fallbacks.
//!
//! Secrets (`GITHUB_TOKEN`, `GEMINI_KEY`) are only ever read from the
//! environment or the command line and are redacted from `Debug` output.

use std::fmt;
use std::time::Duration;

use clap::Args;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_RAW_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Args, Clone)]
pub struct Settings {
    /// Personal access token for the GitHub API (raises rate limits)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    /// Base URL of the raw file content host
    #[arg(long, env = "GITHUB_RAW_URL", default_value = DEFAULT_GITHUB_RAW_URL)]
    pub github_raw_url: String,

    /// Branch used when fetching raw file content
    #[arg(long, env = "GITHUB_BRANCH", default_value = "main")]
    pub github_branch: String,

    /// OAuth client id; enables the GitHub sign-in provider
    #[arg(long, env = "GITHUB_ID")]
    pub github_client_id: Option<String>,

    /// API key for the generative-language endpoint
    #[arg(long, env = "GEMINI_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Model name used for chat completions
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// Base URL of the generative-language API
    #[arg(long, env = "GEMINI_API_URL", default_value = DEFAULT_GEMINI_API_URL)]
    pub gemini_api_url: String,

    /// Timeout for every outbound request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    /// Reject chat requests that carry no file content
    #[arg(long, env = "REQUIRE_FILE_CONTENT")]
    pub require_file_content: bool,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_raw_url: DEFAULT_GITHUB_RAW_URL.to_string(),
            github_branch: "main".to_string(),
            github_client_id: None,
            gemini_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            request_timeout_secs: 30,
            require_file_content: false,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Settings")
            .field("github_token", &redact(&self.github_token))
            .field("github_api_url", &self.github_api_url)
            .field("github_raw_url", &self.github_raw_url)
            .field("github_branch", &self.github_branch)
            .field("github_client_id", &self.github_client_id)
            .field("gemini_key", &redact(&self.gemini_key))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_url", &self.gemini_api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("require_file_content", &self.require_file_content)
            .finish()
    }
}
