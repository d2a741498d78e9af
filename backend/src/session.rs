//! Browse session: the explicit owner of everything a client displays.
//!
//! Holds the searched user, the open repository, the current directory
//! listing, the full tree, the open file, a dismissable error and the chat
//! transcript. Every mutator that fetches starts a new navigation; results
//! whose ticket has gone stale by the time they arrive are dropped.
//!
//! Fetch failures never clear the rest of the view, they only set `error`.

use crate::chat::{ChatRelay, ChatTranscript};
use crate::error::AppError;
use crate::github::GitHubClient;
use crate::models::{
    ChatMessage, ContentEntry, OpenFile, RepoNode, RepositorySummary, TreeWalk, UserProfile,
};
use crate::navigation::{Navigator, Ticket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

pub struct BrowseSession {
    github: GitHubClient,
    navigator: Navigator,
    user: Option<UserProfile>,
    repositories: Vec<RepositorySummary>,
    repository: Option<RepoRef>,
    current_path: String,
    listing: Vec<ContentEntry>,
    tree: TreeWalk,
    open_file: Option<OpenFile>,
    error: Option<String>,
    transcript: Option<ChatTranscript>,
}

impl BrowseSession {
    pub fn new(github: GitHubClient) -> Self {
        Self {
            github,
            navigator: Navigator::new(),
            user: None,
            repositories: Vec::new(),
            repository: None,
            current_path: String::new(),
            listing: Vec::new(),
            tree: TreeWalk::default(),
            open_file: None,
            error: None,
            transcript: None,
        }
    }

    /// Handle for cancelling in-flight navigation from another task.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn repositories(&self) -> &[RepositorySummary] {
        &self.repositories
    }

    pub fn repository(&self) -> Option<&RepoRef> {
        self.repository.as_ref()
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn listing(&self) -> &[ContentEntry] {
        &self.listing
    }

    pub fn tree(&self) -> &TreeWalk {
        &self.tree
    }

    pub fn current_file(&self) -> Option<&OpenFile> {
        self.open_file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transcript(&self) -> Option<&ChatTranscript> {
        self.transcript.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn fail(&mut self, context: &str, err: &AppError) {
        tracing::error!(target: "session", error = %err, "{}", context);
        self.error = Some(format!("{}: {}", context, err));
    }

    fn is_stale(ticket: &Ticket) -> bool {
        if ticket.is_cancelled() {
            tracing::debug!(target: "session", "dropping stale navigation result");
            true
        } else {
            false
        }
    }

    /// Load a user's profile and repository list. Returns whether the result
    /// was applied.
    pub async fn search_user(&mut self, username: &str) -> bool {
        let username = username.trim();
        if username.is_empty() {
            self.error = Some("Please enter a username".to_string());
            return false;
        }

        let ticket = self.navigator.begin();
        let (repos, profile) = tokio::join!(
            self.github.list_user_repos(username),
            self.github.get_user(username)
        );
        if Self::is_stale(&ticket) {
            return false;
        }

        match repos {
            Ok(repos) => self.repositories = repos,
            Err(err) => {
                self.fail("User not found or API error. Please try again.", &err);
                return false;
            }
        }
        match profile {
            Ok(profile) => self.user = Some(profile),
            Err(err) => {
                self.user = None;
                self.fail("Failed to fetch user details", &err);
            }
        }
        true
    }

    /// Open a repository: root listing plus the full tree, and a fresh chat.
    /// The root listing comes from the walk itself.
    pub async fn open_repository(&mut self, owner: &str, name: &str) -> bool {
        let ticket = self.navigator.begin();
        let result = self.github.fetch_tree_with_listing(owner, name, "", &ticket).await;
        if Self::is_stale(&ticket) {
            return false;
        }

        let (listing, walk) = match result {
            Ok(result) => result,
            Err(err) => {
                self.fail("Failed to fetch repository contents", &err);
                return false;
            }
        };

        self.repository = Some(RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        });
        self.current_path.clear();
        self.listing = listing;
        self.open_file = None;
        self.transcript = Some(ChatTranscript::new(name));

        if let Some(first) = walk.errors.first() {
            self.error = Some(format!(
                "Failed to fetch repository contents: {} ({} branch(es) incomplete)",
                first.message,
                walk.errors.len()
            ));
        }
        self.tree = walk;
        true
    }

    pub async fn enter_directory(&mut self, path: &str) -> bool {
        let Some(repo) = self.repository.clone() else {
            self.error = Some("No repository selected".to_string());
            return false;
        };

        let ticket = self.navigator.begin();
        let listing = self.github.list_contents(&repo.owner, &repo.name, path).await;
        if Self::is_stale(&ticket) {
            return false;
        }

        match listing {
            Ok(listing) => {
                self.listing = listing;
                self.current_path = path.to_string();
                self.open_file = None;
                true
            }
            Err(err) => {
                self.fail("Failed to fetch repository contents", &err);
                false
            }
        }
    }

    /// Navigate to the parent of the current directory.
    pub async fn go_up(&mut self) -> bool {
        let parent = self
            .current_path
            .rsplit_once('/')
            .map(|(parent, _)| parent.to_string())
            .unwrap_or_default();
        self.enter_directory(&parent).await
    }

    pub async fn open_file(&mut self, path: &str) -> bool {
        let Some(repo) = self.repository.clone() else {
            self.error = Some("No repository selected".to_string());
            return false;
        };

        let ticket = self.navigator.begin();
        let content = self.github.fetch_file_content(&repo.owner, &repo.name, path).await;
        if Self::is_stale(&ticket) {
            return false;
        }

        match content {
            Ok(content) => {
                if let Some(node) = RepoNode::find_mut(&mut self.tree.nodes, path) {
                    node.set_content(content.clone());
                }
                self.open_file = Some(OpenFile {
                    path: path.to_string(),
                    content,
                });
                true
            }
            Err(err) => {
                self.fail("Failed to fetch file content", &err);
                false
            }
        }
    }

    pub fn close_file(&mut self) {
        self.open_file = None;
    }

    /// Ask about the repository, using the open file (if any) as context.
    pub async fn ask(&mut self, relay: &ChatRelay, question: &str) -> Option<ChatMessage> {
        let context = self
            .open_file
            .as_ref()
            .map(|f| f.content.clone())
            .unwrap_or_default();

        let Some(transcript) = self.transcript.as_mut() else {
            self.error = Some("No repository selected".to_string());
            return None;
        };
        transcript.send(relay, question, &context).await.cloned()
    }
}
