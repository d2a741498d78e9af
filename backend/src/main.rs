//! Repo Chat - browse GitHub repositories and chat about their files
//!
//! # Usage
//! ```bash
//! repo-chat                                   # Start server on 127.0.0.1:3001
//! repo-chat serve --port 8080 --open          # Start and open browser
//! repo-chat tree rust-lang rustlings          # Print a repository tree
//! repo-chat ask owner repo src/main.rs "What does this do?"
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repo_chat::chat::render_plain;
use repo_chat::config::Settings;
use repo_chat::error::AppError;
use repo_chat::github::GitHubClient;
use repo_chat::models::{RepoNode, Sender};
use repo_chat::navigation::Navigator;
use repo_chat::routes;
use repo_chat::session::BrowseSession;
use repo_chat::state::ApiState;

/// Repo Chat - browse GitHub repositories and ask questions about their code
#[derive(Parser)]
#[command(name = "repo-chat")]
#[command(about = "Browse GitHub repositories and chat about their files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    settings: Settings,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve(ServeArgs),
    /// Print the full file tree of a repository
    Tree {
        owner: String,
        repo: String,
        /// Start the walk at this directory
        path: Option<String>,
    },
    /// Ask a question about one file of a repository
    Ask {
        owner: String,
        repo: String,
        file: String,
        question: String,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            open: false,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Cancel `navigator` on Ctrl+C so an in-flight walk stops issuing requests.
fn cancel_on_ctrl_c(navigator: Navigator) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            navigator.cancel();
        }
    });
}

fn print_nodes(nodes: &[RepoNode], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        if node.is_directory() {
            println!("{}{}/", indent, node.name);
            print_nodes(node.children(), depth + 1);
        } else {
            println!("{}{}", indent, node.name);
        }
    }
}

async fn run_tree(settings: &Settings, owner: &str, repo: &str, path: &str) -> anyhow::Result<()> {
    let github = GitHubClient::new(settings)?;
    let navigator = Navigator::new();
    let ticket = navigator.begin();
    cancel_on_ctrl_c(navigator);

    let walk = match github.fetch_tree(owner, repo, path, &ticket).await {
        Ok(walk) => walk,
        Err(AppError::Cancelled) => {
            eprintln!("✗ Cancelled");
            return Ok(());
        }
        Err(e) => return Err(e).with_context(|| format!("failed to walk {}/{}", owner, repo)),
    };

    print_nodes(&walk.nodes, 0);

    let (files, dirs) = RepoNode::count(&walk.nodes);
    println!();
    println!("  {} files, {} directories", files, dirs);
    for failure in &walk.errors {
        eprintln!("  ✗ {}: {}", failure.path, failure.message);
    }
    Ok(())
}

async fn run_ask(settings: &Settings, owner: &str, repo: &str, file: &str, question: &str) -> anyhow::Result<()> {
    let state = ApiState::from_settings(settings)?;
    let mut session = BrowseSession::new(state.github.clone());
    cancel_on_ctrl_c(session.navigator());

    if !session.open_repository(owner, repo).await {
        anyhow::bail!("{}", session.error().unwrap_or("navigation cancelled"));
    }
    if let Some(warning) = session.error() {
        eprintln!("  Warning: {}", warning);
        session.dismiss_error();
    }
    if !session.open_file(file).await {
        anyhow::bail!("{}", session.error().unwrap_or("navigation cancelled"));
    }

    let reply = session
        .ask(&state.relay, question)
        .await
        .context("question was empty")?;

    if let Some(open) = session.current_file() {
        println!("  {} ({} lines)", open.path, open.line_count());
    }
    println!();
    if reply.sender == Sender::Bot && !reply.blocks.is_empty() {
        println!("{}", render_plain(&reply.blocks));
    } else {
        println!("{}", reply.text);
    }
    Ok(())
}

async fn run_server(settings: &Settings, args: ServeArgs) -> anyhow::Result<()> {
    let state = Arc::new(ApiState::from_settings(settings)?);

    let app = routes::create_router(state.clone()).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", args.host, args.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://{}", addr);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │                  Repo Chat                  │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Server:     {}", url);
    println!("  GitHub API: {}", settings.github_api_url);
    println!("  Model:      {}", settings.gemini_model);
    if settings.gemini_key.is_none() {
        println!("  Warning:    GEMINI_KEY is not set, /api/chat will fail");
    }
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if args.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let navigator = state.navigator.clone();
    let shutdown = async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
        navigator.cancel();
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    tracing::debug!(settings = ?cli.settings, "starting");

    match cli.command {
        Some(Commands::Tree { owner, repo, path }) => run_tree(&cli.settings, &owner, &repo, path.as_deref().unwrap_or("")).await,
        Some(Commands::Ask { owner, repo, file, question }) => {
            run_ask(&cli.settings, &owner, &repo, &file, &question).await
        }
        Some(Commands::Serve(args)) => run_server(&cli.settings, args).await,
        None => run_server(&cli.settings, ServeArgs::default()).await,
    }
}
