//! Repo Chat - browse a GitHub user's repositories and ask a language model
//! about the files you are looking at.
//!
//! The HTTP surface lives in [`routes`]; the same pieces drive the terminal
//! commands through [`session::BrowseSession`].

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod state;
