//! Data transfer objects (DTOs) for API requests and responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `tree`: ContentEntry, RepoNode, TreeWalk, BranchError, OpenFile
//! - `chat`: ChatRequest, ChatResponse, ChatMessage, Sender
//! - `github`: UserProfile, RepositorySummary
//! - `auth`: Credentials, SessionUser, ProviderInfo

pub mod auth;
pub mod chat;
pub mod github;
pub mod tree;

pub use auth::*;
pub use chat::*;
pub use github::*;
pub use tree::*;
