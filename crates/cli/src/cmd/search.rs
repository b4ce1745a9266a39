//! Search for repositories

use anyhow::Result;
use hubsync_core::RemoteHost;
use owo_colors::OwoColorize;

pub async fn run(host: &dyn RemoteHost, query: &str, limit: usize) -> Result<()> {
    let matches = host.search_repositories(query, limit).await?;

    if matches.is_empty() {
        println!("No repositories found matching your query.");
        return Ok(());
    }

    for (i, repo) in matches.iter().enumerate() {
        println!("{}", format!("Repository {}:", i + 1).bold());
        println!("  Name: {}", repo.name);
        println!("  Full Name: {}", repo.full_name.cyan());
        println!("  URL: {}", repo.html_url);
        println!(
            "  Description: {}",
            repo.description.as_deref().unwrap_or("(No description)")
        );
        println!("  Stars: {}", repo.stars);
        println!("  Forks: {}", repo.forks);
        println!("  Last Updated: {}", repo.updated_at);
        println!();
    }

    Ok(())
}
