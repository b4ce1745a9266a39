//! GitHub REST wire types and their conversions into engine types

use hubsync_core::{Contents, EntryKind, FileEntry, RemoteEntry, RepoInfo, RepoSummary};
use serde::Deserialize;

/// `GET /user`
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub login: String,
}

/// Error envelope GitHub wraps failure bodies in
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LicenseResponse {
    pub name: String,
}

/// `GET /repos/{owner}/{repo}` and the create-repository response
#[derive(Debug, Deserialize)]
pub struct RepoResponse {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub default_branch: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub license: Option<LicenseResponse>,
    pub private: bool,
    #[serde(default)]
    pub clone_url: String,
    #[serde(default)]
    pub ssh_url: String,
}

impl RepoResponse {
    pub fn into_info(self) -> RepoInfo {
        RepoInfo {
            name: self.name,
            full_name: self.full_name,
            html_url: self.html_url,
            description: self.description,
            default_branch: self.default_branch,
            language: self.language,
            stars: self.stargazers_count,
            forks: self.forks_count,
            open_issues: self.open_issues_count,
            created_at: self.created_at.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
            pushed_at: self.pushed_at.unwrap_or_default(),
            license: self.license.map(|license| license.name),
            private: self.private,
            clone_url: self.clone_url,
            ssh_url: self.ssh_url,
        }
    }
}

/// `GET /search/repositories`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub updated_at: String,
}

impl SearchItem {
    pub fn into_summary(self) -> RepoSummary {
        RepoSummary {
            name: self.name,
            full_name: self.full_name,
            html_url: self.html_url,
            description: self.description,
            stars: self.stargazers_count,
            forks: self.forks_count,
            updated_at: self.updated_at,
        }
    }
}

/// One entry from the contents endpoint, in either listing or single form
#[derive(Debug, Deserialize)]
pub struct ContentItem {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: u64,
    pub sha: String,
    #[serde(default)]
    pub download_url: Option<String>,
    /// Symlink target, present only for symlink entries
    #[serde(default)]
    pub target: Option<String>,
}

impl ContentItem {
    pub fn into_entry(self) -> RemoteEntry {
        RemoteEntry {
            path: self.path,
            kind: self.kind,
            size: self.size,
            sha: self.sha,
        }
    }

    pub fn into_file_entry(self) -> FileEntry {
        FileEntry {
            path: self.path,
            size: self.size,
            sha: self.sha,
            download_url: self.download_url,
            symlink_target: self.target,
        }
    }
}

/// The contents endpoint returns an array for directories and a single
/// object for files
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
    Listing(Vec<ContentItem>),
    Single(ContentItem),
}

impl ContentsResponse {
    pub fn into_contents(self) -> Contents {
        match self {
            Self::Listing(items) => {
                Contents::Dir(items.into_iter().map(ContentItem::into_entry).collect())
            }
            Self::Single(item) => Contents::File(item.into_file_entry()),
        }
    }
}
