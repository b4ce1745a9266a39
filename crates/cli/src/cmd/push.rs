//! Push local files to a repository

use crate::util;
use anyhow::Result;
use hubsync_core::{sync, RemoteHost};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(
    host: &dyn RemoteHost,
    repo_path: &str,
    local_dir: &Path,
    message: &str,
    branch: &str,
) -> Result<()> {
    // 1. Run the push; repository creation and the ownership check live in
    //    the driver
    println!(
        "{}",
        format!("Pushing {} to {}...", local_dir.display(), repo_path).dimmed()
    );
    let outcome = sync::push(host, repo_path, local_dir, message, branch).await?;

    // 2. Creation narration
    if outcome.created_repository {
        println!("{} Created repository {}", "✓".green(), repo_path.cyan());
        if outcome.created_readme {
            println!("  Created README.md file.");
        }
    } else {
        println!("Pushing to existing repository: {}", repo_path.cyan());
    }

    // 3. Nothing qualified: a reported state, not an error
    if outcome.is_noop() {
        println!("Nothing to push: no files qualified after ignore filtering.");
        return Ok(());
    }

    // 4. Summary counts
    if !outcome.added.is_empty() {
        println!("Added {} new files.", outcome.added.len());
    }
    if !outcome.updated.is_empty() {
        println!("Updated {} existing files.", outcome.updated.len());
    }
    if !outcome.skipped.is_empty() {
        println!("Skipped {} unchanged files.", outcome.skipped.len());
    }
    if outcome.added.is_empty() && outcome.updated.is_empty() {
        println!("No files were added or updated.");
    }

    // 5. Processed files with elision
    let processed: Vec<String> = outcome
        .added
        .iter()
        .map(|path| format!("Added: {path}"))
        .chain(outcome.updated.iter().map(|path| format!("Updated: {path}")))
        .collect();
    if !processed.is_empty() {
        println!();
        println!("Processed files:");
        util::print_elided(&processed, 10, "files");
    }

    // 6. Per-file errors with elision
    if !outcome.errors.is_empty() {
        println!();
        println!("{}", "Warnings/Errors:".yellow());
        let errors: Vec<String> = outcome
            .errors
            .iter()
            .map(|err| format!("{}: {}", err.path, err.message))
            .collect();
        util::print_elided(&errors, 5, "errors");
    }

    Ok(())
}
