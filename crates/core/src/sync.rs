//! Pull, push, and compare drivers
//!
//! The drivers isolate per-file failures: a failed fetch, write, create, or
//! update is recorded in the outcome and the loop moves on to the next file.
//! There is no retry — re-running the operation is the retry story, and
//! create-or-update keyed by path keeps re-runs safe.

use crate::error::SyncError;
use crate::hash;
use crate::ignore::IgnoreRules;
use crate::reconcile::{reconcile, DiffReport, FileError};
use crate::remote::{RemoteHost, RepoPath, RepoRef};
use crate::scan::scan_local_tree;
use crate::walk::walk_remote_tree;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Accumulated result of a pull or push.
///
/// Built incrementally while the driver runs, returned once, never mutated
/// afterwards. The per-file lists stay in tree order so reports are
/// deterministic.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    /// Files newly written locally (pull) or created remotely (push)
    pub added: Vec<String>,
    /// Files overwritten locally (pull) or updated remotely (push)
    pub updated: Vec<String>,
    /// Push-side files whose content already matched the remote
    pub skipped: Vec<String>,
    /// Per-file failures; the batch continued past each of these
    pub errors: Vec<FileError>,
    /// The push created the repository
    pub created_repository: bool,
    /// The push synthesized a README.md for the new repository
    pub created_readme: bool,
}

impl SyncOutcome {
    /// True when no file qualified for transfer at all.
    ///
    /// This is a reported state, not an error: an empty local tree after
    /// ignore filtering is a legitimate no-op.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty()
            && self.updated.is_empty()
            && self.skipped.is_empty()
            && self.errors.is_empty()
    }
}

/// Copy the remote tree into a local directory.
///
/// The target directory (and any missing parents) is created first. The
/// remote tree is filtered by the ignore rules bound to the target
/// directory, then each surviving blob is fetched and written binary-exact.
/// Writes are not transactional across the pull: files written before a
/// failure stay on disk and the failure is reported per file.
pub async fn pull(
    host: &dyn RemoteHost,
    repo: &RepoRef,
    local_dir: &Path,
) -> Result<SyncOutcome, SyncError> {
    std::fs::create_dir_all(local_dir).map_err(|source| SyncError::CreateDir {
        path: local_dir.to_path_buf(),
        source,
    })?;

    let rules = IgnoreRules::load(local_dir);
    let remote_tree = walk_remote_tree(host, repo).await;

    let mut outcome = SyncOutcome::default();

    for path in remote_tree.keys() {
        if rules.is_ignored(path) {
            continue;
        }

        let content = match host.read_blob(repo, path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                outcome
                    .errors
                    .push(FileError::new(path, format!("failed to fetch: {err}")));
                continue;
            }
        };

        let target = local_dir.join(path);
        let existed = target.exists();

        if let Some(parent) = target.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                outcome.errors.push(FileError::new(
                    path,
                    format!("failed to create parent directory: {err}"),
                ));
                continue;
            }
        }

        if let Err(err) = std::fs::write(&target, &content) {
            outcome
                .errors
                .push(FileError::new(path, format!("failed to write: {err}")));
            continue;
        }

        if existed {
            outcome.updated.push(path.clone());
        } else {
            outcome.added.push(path.clone());
        }
    }

    Ok(outcome)
}

/// Push a local directory's files to the remote repository.
///
/// A missing repository is created first — but only when the target owner
/// is the authenticated identity; the ownership check rejects before any
/// write. Each local file is then created or updated by path: unchanged
/// content (local blob identifier equals the walked one) is skipped, an
/// update is gated on the remote's current content identifier so a stale
/// write is rejected by the remote rather than silently overwritten.
pub async fn push(
    host: &dyn RemoteHost,
    repo_path: &str,
    local_dir: &Path,
    commit_message: &str,
    branch: &str,
) -> Result<SyncOutcome, SyncError> {
    let path = RepoPath::parse(repo_path)?;

    if !local_dir.is_dir() {
        return Err(SyncError::LocalDirMissing {
            path: local_dir.to_path_buf(),
        });
    }

    let rules = IgnoreRules::load(local_dir);
    let local_tree = scan_local_tree(local_dir, &rules)?;

    let mut outcome = SyncOutcome::default();

    let (repo, remote_tree) = match host.repo_info(&path.owner, &path.name).await {
        Ok(info) => {
            let branch = if branch.is_empty() {
                info.default_branch.clone()
            } else {
                branch.to_string()
            };
            let repo = path.at(branch);
            let remote_tree = walk_remote_tree(host, &repo).await;
            (repo, remote_tree)
        }
        Err(err) if err.is_not_found() => {
            let login = host.authenticated_login().await?;
            if !path.owner.eq_ignore_ascii_case(&login) {
                return Err(SyncError::OwnershipMismatch {
                    owner: path.owner,
                    name: path.name,
                    login,
                });
            }

            host.create_repository(&path.name).await?;
            outcome.created_repository = true;

            let branch = if branch.is_empty() {
                "main".to_string()
            } else {
                branch.to_string()
            };
            let repo = path.at(branch);

            let has_readme = local_tree.keys().any(|p| p.eq_ignore_ascii_case("readme.md"));
            if !has_readme {
                let readme = format!("# {}\n", repo.name);
                match host
                    .create_file(&repo, "README.md", "Initial commit: Add README", readme.as_bytes())
                    .await
                {
                    Ok(()) => outcome.created_readme = true,
                    Err(err) => {
                        warn!("Failed to create README for new repository: {}", err);
                        outcome.errors.push(FileError::new(
                            "README.md",
                            format!("failed to create README: {err}"),
                        ));
                    }
                }
            }

            // Nothing to walk in a repository that did not exist a moment ago
            (repo, BTreeMap::new())
        }
        Err(err) => return Err(err.into()),
    };

    for (rel_path, location) in &local_tree {
        let content = match std::fs::read(location) {
            Ok(bytes) => bytes,
            Err(err) => {
                outcome
                    .errors
                    .push(FileError::new(rel_path, format!("failed to read local file: {err}")));
                continue;
            }
        };

        match remote_tree.get(rel_path) {
            Some(sha) if hash::matches_sha(&content, sha) => {
                outcome.skipped.push(rel_path.clone());
            }
            Some(sha) => {
                let message = format!("{commit_message}: Update {rel_path}");
                match host
                    .update_file(&repo, rel_path, &message, &content, sha)
                    .await
                {
                    Ok(()) => outcome.updated.push(rel_path.clone()),
                    Err(err) => outcome
                        .errors
                        .push(FileError::new(rel_path, format!("failed to update: {err}"))),
                }
            }
            None => {
                let message = format!("{commit_message}: Add {rel_path}");
                match host.create_file(&repo, rel_path, &message, &content).await {
                    Ok(()) => outcome.added.push(rel_path.clone()),
                    Err(err) => outcome
                        .errors
                        .push(FileError::new(rel_path, format!("failed to create: {err}"))),
                }
            }
        }
    }

    Ok(outcome)
}

/// Compare a local directory against the remote tree without mutating
/// either side.
pub async fn compare(
    host: &dyn RemoteHost,
    repo: &RepoRef,
    local_dir: &Path,
) -> Result<DiffReport, SyncError> {
    if !local_dir.is_dir() {
        return Err(SyncError::LocalDirMissing {
            path: local_dir.to_path_buf(),
        });
    }

    let rules = IgnoreRules::load(local_dir);
    let local_tree = scan_local_tree(local_dir, &rules)?;
    let remote_tree = walk_remote_tree(host, repo).await;

    Ok(reconcile(host, repo, &local_tree, &remote_tree, &rules).await)
}
