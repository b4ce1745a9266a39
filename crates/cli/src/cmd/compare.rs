//! Compare a local directory against a repository

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

    // 2. Reconcile both trees without touching either side
    let report = sync::compare(host, &repo, local_dir).await?;

    // 3. Summary
    println!(
        "Comparison between local directory '{}' and repository '{}' (branch: {}):",
        local_dir.display(),
        repo.full_name(),
        repo.branch
    );
    println!();
    println!("{}", "Summary:".bold());
    println!("- Files only in repository: {}", report.remote_only.len());
    println!("- Files only in local directory: {}", report.local_only.len());
    println!("- Files modified locally: {}", report.differs.len());
    println!("- Files identical: {}", report.identical.len());
    if !report.errors.is_empty() {
        println!("- Files with comparison errors: {}", report.errors.len());
    }
    println!();

    // 4. Per-category detail, first 10 entries each
    print_section("Files only in repository:", &report.remote_only);
    print_section("Files only in local directory:", &report.local_only);
    print_section("Files modified locally:", &report.differs);

    if !report.errors.is_empty() {
        println!("{}", "Files with comparison errors:".yellow());
        let errors: Vec<String> = report
            .errors
            .iter()
            .map(|err| format!("{} ({})", err.path, err.message))
            .collect();
        util::print_elided(&errors, 10, "files");
        println!();
    }

    if report.in_sync() {
        println!(
            "{} Local directory and repository are in sync. All files are identical.",
            "✓".green()
        );
    }

    Ok(())
}

fn print_section(title: &str, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    println!("{}", title.bold());
    util::print_elided(paths, 10, "files");
    println!();
}
