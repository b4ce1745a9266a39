//! Show repository metadata, directory listings, and file content

use crate::util;
use anyhow::Result;
use hubsync_core::{remote, Contents, EntryKind, RemoteHost, RepoInfo};
use owo_colors::OwoColorize;

pub async fn run(
    host: &dyn RemoteHost,
    repo_path: &str,
    path: &str,
    branch: &str,
    include_content: bool,
) -> Result<()> {
    // 1. Resolve the repository and branch
    let (info, repo) = remote::resolve_repo(host, repo_path, branch).await?;

    // 2. Repository header always comes first
    print_repo_info(&info, &repo.branch);

    // 3. Fetch the requested path; a path error still leaves the header useful
    let contents = match host.contents(&repo, path).await {
        Ok(contents) => contents,
        Err(err) => {
            println!(
                "{} Error accessing path '{}' in repository: {}",
                "!".yellow(),
                path,
                err
            );
            return Ok(());
        }
    };

    match contents {
        Contents::Dir(entries) => print_listing(path, entries),
        Contents::File(file) => {
            println!("{}", "File information".bold());
            println!("--------------------------------------------------");
            println!("File: {}", file.path.cyan());
            println!("Size: {}", util::format_size(file.size));
            println!("SHA: {}", file.sha);
            if let Some(target) = &file.symlink_target {
                println!("Symlink to: {}", target);
            }
            if let Some(url) = &file.download_url {
                println!("Download URL: {}", url);
            }
            println!("--------------------------------------------------");

            if include_content {
                // 4. Only valid UTF-8 is printable; anything else is reported,
                //    not mangled
                println!();
                println!("{}", "File content".bold());
                println!("--------------------------------------------------");
                let bytes = host.read_blob(&repo, path).await?;
                match String::from_utf8(bytes) {
                    Ok(text) => println!("{}", text),
                    Err(_) => println!("(Binary file - content not displayed)"),
                }
            } else {
                println!();
                println!(
                    "{}",
                    "Re-run with --content to print the file content.".dimmed()
                );
            }
        }
    }

    Ok(())
}

fn print_repo_info(info: &RepoInfo, current_branch: &str) {
    println!("{}", "Repository information".bold());
    println!("==================================================");
    println!("Repository: {}", info.full_name.cyan());
    println!("URL: {}", info.html_url);
    println!(
        "Description: {}",
        info.description.as_deref().unwrap_or("(No description)")
    );
    println!("Default Branch: {}", info.default_branch);
    println!("Current Branch: {}", current_branch);
    println!(
        "Primary Language: {}",
        info.language.as_deref().unwrap_or("Not specified")
    );
    println!(
        "Stars: {} | Forks: {} | Issues: {}",
        info.stars, info.forks, info.open_issues
    );
    println!(
        "Created: {} | Updated: {} | Last Push: {}",
        util::date_part(&info.created_at),
        util::date_part(&info.updated_at),
        util::date_part(&info.pushed_at)
    );
    if let Some(license) = &info.license {
        println!("License: {}", license);
    }
    println!(
        "Visibility: {}",
        if info.private { "Private" } else { "Public" }
    );
    println!("Clone URL (HTTPS): {}", info.clone_url);
    println!("Clone URL (SSH): {}", info.ssh_url);
    println!("==================================================");
    println!();
}

fn print_listing(path: &str, entries: Vec<hubsync_core::RemoteEntry>) {
    let path_display = if path.is_empty() { "root" } else { path };
    println!("{}", format!("Directory contents: '{}'", path_display).bold());
    println!("--------------------------------------------------");

    let (mut dirs, mut files): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|entry| entry.kind == EntryKind::Dir);
    dirs.sort_by_key(|entry| entry.path.to_lowercase());
    files.sort_by_key(|entry| entry.path.to_lowercase());

    if dirs.is_empty() {
        println!("(No subdirectories)");
    } else {
        for dir in &dirs {
            println!("  {}/", base_name(&dir.path).cyan());
        }
    }

    println!();

    if files.is_empty() {
        println!("(No files)");
    } else {
        println!("Files:");
        for file in &files {
            println!(
                "  {} ({})",
                base_name(&file.path),
                util::format_size(file.size)
            );
        }
    }

    println!();
    println!("--------------------------------------------------");
    println!(
        "{}",
        "Pass --path to descend; add --content to print a file.".dimmed()
    );
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
