use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};

use crate::error::{AppError, Result};
use crate::github::client::GitHubClient;
use crate::models::{BranchError, ContentEntry, RepoNode, TreeWalk};
use crate::navigation::Ticket;

type Subtree = (Vec<RepoNode>, Vec<BranchError>);

impl GitHubClient {
    /// Walk the repository from `path` down, keeping the API's listing order.
    ///
    /// A failure listing `path` itself is returned as an error. Failures on
    /// nested directories are isolated: the directory is kept with no children
    /// and the failure is recorded in `TreeWalk::errors`.
    pub async fn fetch_tree(&self, owner: &str, repo: &str, path: &str, ticket: &Ticket) -> Result<TreeWalk> {
        let (_, walk) = self.fetch_tree_with_listing(owner, repo, path, ticket).await?;
        Ok(walk)
    }

    /// Same walk as [`fetch_tree`](Self::fetch_tree), also returning the
    /// single-level listing of `path` it started from.
    pub async fn fetch_tree_with_listing(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ticket: &Ticket,
    ) -> Result<(Vec<ContentEntry>, TreeWalk)> {
        ticket.check()?;
        let entries = self.list_contents(owner, repo, path).await?;
        ticket.check()?;

        let (nodes, errors) = self.build_nodes(owner, repo, entries.clone(), ticket).await?;
        if !errors.is_empty() {
            tracing::warn!(
                target: "github",
                "tree walk of {}/{} finished with {} failed branch(es)",
                owner,
                repo,
                errors.len()
            );
        }

        Ok((entries, TreeWalk { nodes, errors }))
    }

    /// Siblings are fetched concurrently; `join_all` keeps their input order.
    fn build_nodes<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        entries: Vec<ContentEntry>,
        ticket: &'a Ticket,
    ) -> BoxFuture<'a, Result<Subtree>> {
        async move {
            let results = join_all(
                entries
                    .into_iter()
                    .map(|entry| self.build_node(owner, repo, entry, ticket)),
            )
            .await;

            let mut nodes = Vec::with_capacity(results.len());
            let mut errors = Vec::new();
            for result in results {
                let (node, mut branch_errors) = result?;
                nodes.push(node);
                errors.append(&mut branch_errors);
            }
            Ok((nodes, errors))
        }
        .boxed()
    }

    async fn build_node(
        &self,
        owner: &str,
        repo: &str,
        entry: ContentEntry,
        ticket: &Ticket,
    ) -> Result<(RepoNode, Vec<BranchError>)> {
        if !entry.is_dir() {
            return Ok((RepoNode::file(entry.name, entry.path), Vec::new()));
        }

        ticket.check()?;
        match self.list_contents(owner, repo, &entry.path).await {
            Ok(children) => {
                ticket.check()?;
                let (nodes, errors) = self.build_nodes(owner, repo, children, ticket).await?;
                Ok((RepoNode::directory(entry.name, entry.path, nodes), errors))
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                tracing::warn!(target: "github", error = %err, "failed to list {}", entry.path);
                let failure = BranchError {
                    path: entry.path.clone(),
                    message: err.to_string(),
                };
                Ok((RepoNode::directory(entry.name, entry.path, Vec::new()), vec![failure]))
            }
        }
    }
}
