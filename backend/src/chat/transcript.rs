use chrono::Utc;

use crate::chat::format::{Block, parse_response, render_html};
use crate::chat::relay::ChatRelay;
use crate::models::{ChatMessage, Sender};

pub const EMPTY_ANSWER: &str = "I couldn't generate a response.";
pub const RELAY_APOLOGY: &str = "Sorry, there was an error processing your request. Please try again.";

/// Ordered, in-memory chat history for one browse session.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatTranscript {
    /// Start a transcript with the greeting for `repo_name`.
    pub fn new(repo_name: &str) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 0,
        };
        transcript.push(
            Sender::Bot,
            Vec::new(),
            format!(
                "Hello! I'm here to help you understand the {} repository. You can ask me about the code structure, specific files, or any questions about the codebase.",
                repo_name
            ),
        );
        transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn push(&mut self, sender: Sender, blocks: Vec<Block>, text: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            sender,
            timestamp: Utc::now(),
            blocks,
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Append the question, relay it with `file_context`, and append the
    /// answer. Blank input is ignored and returns `None`.
    pub async fn send(&mut self, relay: &ChatRelay, input: &str, file_context: &str) -> Option<&ChatMessage> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }
        self.push(Sender::User, Vec::new(), question.to_string());

        let (blocks, reply) = match relay.relay(question, file_context).await {
            Ok(output) => {
                let blocks = parse_response(&output);
                if blocks.is_empty() {
                    (blocks, EMPTY_ANSWER.to_string())
                } else {
                    let rendered = render_html(&blocks);
                    (blocks, rendered)
                }
            }
            Err(err) => {
                tracing::error!(target: "chat", error = %err, "chat error");
                (Vec::new(), RELAY_APOLOGY.to_string())
            }
        };

        Some(self.push(Sender::Bot, blocks, reply))
    }
}
