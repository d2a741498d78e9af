use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AppError, Result};

/// Message returned to callers for any upstream model failure.
pub const RELAY_FAILURE: &str = "An error occurred while processing your request";

/// A hosted text-generation model.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

pub fn build_prompt(message: &str, file_context: &str) -> String {
    format!("User input: {}\nFile content context: {}", message, file_context)
}

/// Forwards a question plus file context to the model. One upstream call per
/// relay; no retries and no caching.
#[derive(Clone)]
pub struct ChatRelay {
    model: Arc<dyn CompletionModel>,
    require_file_context: bool,
}

impl ChatRelay {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            require_file_context: false,
        }
    }

    /// Also reject requests that carry no file context.
    pub fn require_file_context(mut self, required: bool) -> Self {
        self.require_file_context = required;
        self
    }

    pub async fn relay(&self, message: &str, file_context: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(AppError::Validation("No input provided".to_string()));
        }
        if self.require_file_context && file_context.trim().is_empty() {
            return Err(AppError::Validation(
                "No input or file content provided".to_string(),
            ));
        }

        let prompt = build_prompt(message, file_context);
        tracing::debug!(target: "chat", prompt_len = prompt.len(), "relaying prompt");

        match self.model.generate(&prompt).await {
            Ok(output) => Ok(output),
            Err(err) => {
                tracing::error!(target: "chat", error = %format!("{:#}", err), "model call failed");
                let details = format!("{:#}", err);
                Err(AppError::Relay {
                    message: RELAY_FAILURE.to_string(),
                    details: if details.is_empty() {
                        "Unknown error".to_string()
                    } else {
                        details
                    },
                })
            }
        }
    }
}
