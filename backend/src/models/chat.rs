//! Chat relay wire types and transcript messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::format::Block;

/// Body of `POST /api/chat`. Both fields are optional on the wire so that a
/// missing `body` is reported as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, rename = "fileContent")]
    pub file_content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub output: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    /// May contain the minimal markup produced by the response renderer.
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Typed form of a bot answer, for clients that render blocks themselves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}
