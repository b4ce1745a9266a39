//! Pull remote files into a local directory

use crate::util;
use anyhow::Result;
use hubsync_core::{remote, sync, RemoteHost};
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(
    host: &dyn RemoteHost,
    repo_path: &str,
    local_dir: &Path,
    branch: &str,
) -> Result<()> {
    // 1. Resolve the repository and branch
    let (_, repo) = remote::resolve_repo(host, repo_path, branch).await?;

    // 2. Run the pull
    println!(
        "{}",
        format!("Pulling {} (branch: {})...", repo.full_name(), repo.branch).dimmed()
    );
    let outcome = sync::pull(host, &repo, local_dir).await?;

    // 3. Report
    let written: Vec<String> = outcome
        .added
        .iter()
        .map(|path| format!("Added: {path}"))
        .chain(outcome.updated.iter().map(|path| format!("Updated: {path}")))
        .collect();

    if written.is_empty() && outcome.errors.is_empty() {
        println!(
            "No files were pulled. Either the repository is empty or all files are being ignored."
        );
        return Ok(());
    }

    if !written.is_empty() {
        println!(
            "{} Pulled {} files into {}",
            "✓".green(),
            written.len(),
            local_dir.display()
        );
        util::print_elided(&written, 10, "files");
    }

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
