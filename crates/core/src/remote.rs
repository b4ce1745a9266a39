//! Remote host capability and shared repository types
//!
//! The remote's transport/auth client is modeled as a trait so every
//! operation receives it as a parameter — never a process-wide singleton —
//! and tests can inject an in-memory fake.

use crate::error::{RemoteError, SyncError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A validated `owner/repo` pair, not yet bound to a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    pub owner: String,
    pub name: String,
}

impl RepoPath {
    /// Parse an `owner/repo` path.
    ///
    /// Rejects anything that is not exactly two non-empty segments before
    /// any I/O happens.
    pub fn parse(repo_path: &str) -> Result<Self, SyncError> {
        let mut parts = repo_path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(SyncError::InvalidRepoPath {
                path: repo_path.to_string(),
            }),
        }
    }

    /// Bind the path to a resolved branch
    pub fn at(self, branch: impl Into<String>) -> RepoRef {
        RepoRef {
            owner: self.owner,
            name: self.name,
            branch: branch.into(),
        }
    }

    /// The path in `owner/repo` form
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Reference to a remote repository at a branch tip.
///
/// The branch is always non-empty: callers resolve an empty user-supplied
/// branch against the repository's default branch before constructing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl RepoRef {
    /// The repository path in `owner/repo` form
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Kind of entry in a remote directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// Entry in a remote directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Repository-relative path
    pub path: String,
    pub kind: EntryKind,
    /// Size in bytes (zero for directories)
    pub size: u64,
    /// Content identifier of the blob or subtree
    pub sha: String,
}

/// A single remote file with full metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub size: u64,
    pub sha: String,
    pub download_url: Option<String>,
    /// Target path when the entry is a symlink
    pub symlink_target: Option<String>,
}

/// Contents at a remote path: a directory listing or a single file
#[derive(Debug, Clone)]
pub enum Contents {
    Dir(Vec<RemoteEntry>),
    File(FileEntry),
}

/// Repository metadata as reported by the remote
#[derive(Debug, Clone, Default)]
pub struct RepoInfo {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub default_branch: String,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// ISO-8601 timestamps, passed through as reported
    pub created_at: String,
    pub updated_at: String,
    pub pushed_at: String,
    pub license: Option<String>,
    pub private: bool,
    pub clone_url: String,
    pub ssh_url: String,
}

/// One repository search match
#[derive(Debug, Clone)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub updated_at: String,
}

/// Capability contract for the remote repository host.
///
/// Reads and writes all happen at the branch tip named by the [`RepoRef`];
/// updates are gated on the expected content identifier so a concurrent
/// write is rejected by the remote instead of silently overwritten.
#[async_trait]
pub trait RemoteHost: Send + Sync {
    /// Login of the authenticated identity
    async fn authenticated_login(&self) -> Result<String, RemoteError>;

    /// Top search matches for a repository query
    async fn search_repositories(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RepoSummary>, RemoteError>;

    /// Repository metadata; `NotFound` when the repository does not exist
    async fn repo_info(&self, owner: &str, name: &str) -> Result<RepoInfo, RemoteError>;

    /// Directory listing or single-file entry at a path on the branch tip
    async fn contents(&self, repo: &RepoRef, path: &str) -> Result<Contents, RemoteError>;

    /// Raw bytes of the blob at a path on the branch tip
    async fn read_blob(&self, repo: &RepoRef, path: &str) -> Result<Vec<u8>, RemoteError>;

    /// Create a new file on the branch
    async fn create_file(
        &self,
        repo: &RepoRef,
        path: &str,
        message: &str,
        content: &[u8],
    ) -> Result<(), RemoteError>;

    /// Update an existing file, gated on its current content identifier
    async fn update_file(
        &self,
        repo: &RepoRef,
        path: &str,
        message: &str,
        content: &[u8],
        expected_sha: &str,
    ) -> Result<(), RemoteError>;

    /// Create a repository under the authenticated identity
    async fn create_repository(&self, name: &str) -> Result<RepoInfo, RemoteError>;
}

/// Resolve an `owner/repo` path and branch against the remote.
///
/// An empty branch falls back to the repository's default branch, so the
/// returned [`RepoRef`] always carries a usable branch name.
pub async fn resolve_repo(
    host: &dyn RemoteHost,
    repo_path: &str,
    branch: &str,
) -> Result<(RepoInfo, RepoRef), SyncError> {
    let path = RepoPath::parse(repo_path)?;
    let info = host.repo_info(&path.owner, &path.name).await?;

    let branch = if branch.is_empty() {
        info.default_branch.clone()
    } else {
        branch.to_string()
    };

    Ok((info, path.at(branch)))
}
