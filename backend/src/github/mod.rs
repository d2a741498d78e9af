pub mod client;
pub mod tree;

pub use client::GitHubClient;
