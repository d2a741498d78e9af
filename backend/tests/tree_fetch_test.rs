//! Repository tree walks and file fetches against a mock GitHub host.

mod common;

use common::{MockUpstream, dir, file, sample_repo, settings_for, start};
use repo_chat::error::AppError;
use repo_chat::github::GitHubClient;
use repo_chat::models::{NodeKind, RepoNode};
use repo_chat::navigation::Navigator;

async fn client_with(mock: &std::sync::Arc<MockUpstream>) -> GitHubClient {
    let base = start(mock.clone()).await;
    GitHubClient::new(&settings_for(&base)).unwrap()
}

fn names(nodes: &[RepoNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

#[tokio::test]
async fn walk_preserves_listing_order_and_depth() {
    let mock = MockUpstream::new();
    sample_repo(&mock);
    let client = client_with(&mock).await;

    let ticket = Navigator::new().begin();
    let walk = client.fetch_tree("octocat", "sample", "", &ticket).await.unwrap();

    assert!(walk.errors.is_empty());
    assert_eq!(names(&walk.nodes), vec!["src", "README.md", "docs", "Cargo.toml"]);
    assert_eq!(RepoNode::count(&walk.nodes), (4, 3));

    let src = &walk.nodes[0];
    assert_eq!(src.kind, NodeKind::Directory);
    assert_eq!(names(src.children()), vec!["lib.rs", "bin"]);

    let bin = &src.children()[1];
    assert_eq!(bin.path, "src/bin");
    assert_eq!(names(bin.children()), vec!["cli.rs"]);

    let readme = &walk.nodes[1];
    assert_eq!(readme.kind, NodeKind::File);
    assert!(readme.children.is_none());
    assert!(readme.content.is_none());

    let docs = &walk.nodes[2];
    assert_eq!(docs.children, Some(vec![]));

    // Root, src, src/bin and docs.
    assert_eq!(mock.requests(), 4);
}

#[tokio::test]
async fn wide_listing_keeps_order_under_concurrency() {
    let mock = MockUpstream::new();
    let mut root = Vec::new();
    for i in 0..12 {
        let path = format!("d{i:02}");
        // Earlier directories answer slower, so completion order is reversed.
        mock.delay(&path, (12 - i) * 5);
        mock.listing(&path, vec![file(&format!("{path}/f.txt"))]);
        root.push(dir(&path));
        root.push(file(&format!("f{i:02}.txt")));
    }
    mock.listing("", root);
    let client = client_with(&mock).await;

    let walk = client
        .fetch_tree("o", "r", "", &Navigator::new().begin())
        .await
        .unwrap();

    assert_eq!(walk.nodes.len(), 24);
    for (i, pair) in walk.nodes.chunks(2).enumerate() {
        assert_eq!(pair[0].name, format!("d{i:02}"));
        assert_eq!(pair[0].children().len(), 1);
        assert_eq!(pair[1].name, format!("f{i:02}.txt"));
    }
    assert_eq!(RepoNode::count(&walk.nodes), (24, 12));
}

#[tokio::test]
async fn nested_failure_is_isolated_to_its_branch() {
    let mock = MockUpstream::new();
    sample_repo(&mock);
    mock.fail("src/bin");
    let client = client_with(&mock).await;

    let walk = client
        .fetch_tree("octocat", "sample", "", &Navigator::new().begin())
        .await
        .unwrap();

    assert_eq!(names(&walk.nodes), vec!["src", "README.md", "docs", "Cargo.toml"]);
    let bin = &walk.nodes[0].children()[1];
    assert_eq!(bin.kind, NodeKind::Directory);
    assert_eq!(bin.children, Some(vec![]));

    assert_eq!(walk.errors.len(), 1);
    assert_eq!(walk.errors[0].path, "src/bin");
    assert!(walk.errors[0].message.contains("500"));
}

#[tokio::test]
async fn root_failure_is_returned_to_caller() {
    let mock = MockUpstream::new();
    let client = client_with(&mock).await;

    let err = client
        .fetch_tree("octocat", "missing", "", &Navigator::new().begin())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn walk_starting_below_root() {
    let mock = MockUpstream::new();
    sample_repo(&mock);
    let client = client_with(&mock).await;

    let walk = client
        .fetch_tree("octocat", "sample", "src", &Navigator::new().begin())
        .await
        .unwrap();
    assert_eq!(names(&walk.nodes), vec!["lib.rs", "bin"]);
}

#[tokio::test]
async fn cancelled_ticket_issues_no_requests() {
    let mock = MockUpstream::new();
    sample_repo(&mock);
    let client = client_with(&mock).await;

    let navigator = Navigator::new();
    let ticket = navigator.begin();
    navigator.begin();

    let err = client.fetch_tree("octocat", "sample", "", &ticket).await.unwrap_err();
    assert!(matches!(err, AppError::Cancelled));
    assert_eq!(mock.requests(), 0);
}

#[tokio::test]
async fn cancelling_mid_walk_stops_descent() {
    let mock = MockUpstream::new();
    sample_repo(&mock);
    mock.delay("", 100);
    let client = client_with(&mock).await;

    let navigator = Navigator::new();
    let ticket = navigator.begin();
    let canceller = navigator.clone();
    let (result, _) = tokio::join!(client.fetch_tree("octocat", "sample", "", &ticket), async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        canceller.cancel();
    });

    assert!(matches!(result, Err(AppError::Cancelled)));
    // Only the root listing went out.
    assert_eq!(mock.requests(), 1);
}

#[tokio::test]
async fn blank_owner_is_a_validation_error() {
    let mock = MockUpstream::new();
    let client = client_with(&mock).await;

    let err = client
        .fetch_tree("", "repo", "", &Navigator::new().begin())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(mock.requests(), 0);
}

#[tokio::test]
async fn file_content_is_fetched_from_raw_host() {
    let mock = MockUpstream::new();
    sample_repo(&mock);
    let client = client_with(&mock).await;

    let content = client
        .fetch_file_content("octocat", "sample", "src/lib.rs")
        .await
        .unwrap();
    assert_eq!(content, "pub fn hello() -> &'static str { \"hi\" }\n");

    let missing = client.fetch_file_content("octocat", "sample", "nope.rs").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn listing_a_file_path_is_rejected() {
    let mock = MockUpstream::new();
    sample_repo(&mock);
    let client = client_with(&mock).await;

    let err = client
        .list_contents("octocat", "sample", "README.md")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg.contains("not a directory")));
}

#[tokio::test]
async fn user_profile_and_repositories() {
    let mock = MockUpstream::new();
    let client = client_with(&mock).await;

    let profile = client.get_user("octocat").await.unwrap();
    assert_eq!(profile.name.as_deref(), Some("The Octocat"));
    assert_eq!(profile.followers, 42);

    let repos = client.list_user_repos("octocat").await.unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].owner.login, "octocat");

    assert!(matches!(client.get_user("ghost").await, Err(AppError::NotFound(_))));
}
