//! Hubsync CLI - hubsync command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hubsync_github::GitHubClient;
use std::path::PathBuf;

mod cmd;
mod util;

/// Hubsync - browse, pull, push, and compare GitHub repositories
#[derive(Parser)]
#[command(name = "hubsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for repositories
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Show repository info, directory listings, and file content
    Browse {
        /// Repository path in 'owner/repo' format
        repo: String,

        /// Path within the repository (default: root)
        #[arg(long, default_value = "")]
        path: String,

        /// Branch to browse (default: repository's default branch)
        #[arg(short, long, default_value = "")]
        branch: String,

        /// Print file content when the path is a single file
        #[arg(long)]
        content: bool,
    },
    /// Pull remote files into a local directory
    Pull {
        /// Repository path in 'owner/repo' format
        repo: String,

        /// Local directory to pull into (created if missing)
        local_dir: PathBuf,

        /// Branch to pull from (default: repository's default branch)
        #[arg(short, long, default_value = "")]
        branch: String,
    },
    /// Push local files to a repository, creating it if needed
    Push {
        /// Repository path in 'owner/repo' format
        repo: String,

        /// Local directory to push from
        local_dir: PathBuf,

        /// Commit message for the changes
        message: String,

        /// Branch to push to (default: repository's default branch)
        #[arg(short, long, default_value = "")]
        branch: String,
    },
    /// Compare a local directory against a repository
    Compare {
        /// Repository path in 'owner/repo' format
        repo: String,

        /// Local directory to compare
        local_dir: PathBuf,

        /// Branch to compare with (default: repository's default branch)
        #[arg(short, long, default_value = "")]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Fail fast before any command runs when the credential is missing
    let token = std::env::var("GITHUB_API_TOKEN")
        .context("GITHUB_API_TOKEN is not set; export a GitHub token before running hubsync")?;
    let host = GitHubClient::new(token)?;

    match cli.command {
        Commands::Search { query, limit } => cmd::search::run(&host, &query, limit).await,
        Commands::Browse {
            repo,
            path,
            branch,
            content,
        } => cmd::browse::run(&host, &repo, &path, &branch, content).await,
        Commands::Pull {
            repo,
            local_dir,
            branch,
        } => cmd::pull::run(&host, &repo, &local_dir, &branch).await,
        Commands::Push {
            repo,
            local_dir,
            message,
            branch,
        } => cmd::push::run(&host, &repo, &local_dir, &message, &branch).await,
        Commands::Compare {
            repo,
            local_dir,
            branch,
        } => cmd::compare::run(&host, &repo, &local_dir, &branch).await,
    }
}
