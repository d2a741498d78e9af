//! Chat relay: prompt assembly, the completion-model seam, response
//! rendering and the in-memory transcript.

pub mod format;
pub mod gemini;
pub mod relay;
pub mod transcript;

pub use format::{Block, parse_response, render_html, render_plain};
pub use gemini::GeminiClient;
pub use relay::{ChatRelay, CompletionModel, build_prompt};
pub use transcript::ChatTranscript;
