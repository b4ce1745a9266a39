//! In-memory remote host for driving the engine in tests

use async_trait::async_trait;
use hubsync_core::hash;
use hubsync_core::{
    Contents, EntryKind, FileEntry, RemoteEntry, RemoteError, RemoteHost, RepoInfo, RepoRef,
    RepoSummary,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

#[derive(Debug, Default, Clone)]
struct FakeRepo {
    default_branch: String,
    /// path -> raw content
    files: BTreeMap<String, Vec<u8>>,
}

#[derive(Debug, Default)]
struct FakeState {
    /// Keyed by "owner/name"
    repos: BTreeMap<String, FakeRepo>,
    /// Every mutation that reached the host, for no-write assertions
    writes: Vec<String>,
}

/// In-memory [`RemoteHost`] with scriptable per-path failures
pub struct FakeHost {
    pub login: String,
    fail_paths: BTreeSet<String>,
    state: Mutex<FakeState>,
}

impl FakeHost {
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            fail_paths: BTreeSet::new(),
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Register a repository with the given files, default branch "main"
    pub fn add_repo(&self, full_name: &str, files: &[(&str, &[u8])]) {
        let repo = FakeRepo {
            default_branch: "main".to_string(),
            files: files
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_vec()))
                .collect(),
        };
        self.state
            .lock()
            .unwrap()
            .repos
            .insert(full_name.to_string(), repo);
    }

    /// Make contents/read_blob/create/update fail when touching `path`
    pub fn fail_on(mut self, path: &str) -> Self {
        self.fail_paths.insert(path.to_string());
        self
    }

    /// Snapshot of a repository's files
    pub fn files(&self, full_name: &str) -> BTreeMap<String, Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .repos
            .get(full_name)
            .map(|repo| repo.files.clone())
            .unwrap_or_default()
    }

    /// Paths mutated through the write capabilities, in call order
    pub fn writes(&self) -> Vec<String> {
        self.state.lock().unwrap().writes.clone()
    }

    fn check_fail(&self, path: &str) -> Result<(), RemoteError> {
        if self.fail_paths.contains(path) {
            return Err(RemoteError::Status {
                code: 500,
                message: format!("injected failure for '{path}'"),
            });
        }
        Ok(())
    }

    fn repo_info_for(full_name: &str, repo: &FakeRepo) -> RepoInfo {
        let name = full_name.split('/').nth(1).unwrap_or(full_name);
        RepoInfo {
            name: name.to_string(),
            full_name: full_name.to_string(),
            html_url: format!("https://example.com/{full_name}"),
            default_branch: repo.default_branch.clone(),
            ..RepoInfo::default()
        }
    }
}

#[async_trait]
impl RemoteHost for FakeHost {
    async fn authenticated_login(&self) -> Result<String, RemoteError> {
        Ok(self.login.clone())
    }

    async fn search_repositories(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RepoSummary>, RemoteError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .repos
            .iter()
            .filter(|(full_name, _)| full_name.contains(query))
            .take(limit)
            .map(|(full_name, _)| RepoSummary {
                name: full_name.split('/').nth(1).unwrap_or(full_name).to_string(),
                full_name: full_name.clone(),
                html_url: format!("https://example.com/{full_name}"),
                description: None,
                stars: 0,
                forks: 0,
                updated_at: "2024-01-01T00:00:00Z".to_string(),
            })
            .collect())
    }

    async fn repo_info(&self, owner: &str, name: &str) -> Result<RepoInfo, RemoteError> {
        let full_name = format!("{owner}/{name}");
        let state = self.state.lock().unwrap();
        state
            .repos
            .get(&full_name)
            .map(|repo| Self::repo_info_for(&full_name, repo))
            .ok_or_else(|| RemoteError::not_found(full_name))
    }

    async fn contents(&self, repo: &RepoRef, path: &str) -> Result<Contents, RemoteError> {
        self.check_fail(path)?;

        let state = self.state.lock().unwrap();
        let fake = state
            .repos
            .get(&repo.full_name())
            .ok_or_else(|| RemoteError::not_found(repo.full_name()))?;

        if let Some(content) = fake.files.get(path) {
            return Ok(Contents::File(FileEntry {
                path: path.to_string(),
                size: content.len() as u64,
                sha: hash::blob_sha(content).to_hex(),
                download_url: None,
                symlink_target: None,
            }));
        }

        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut dirs = BTreeSet::new();
        let mut entries = Vec::new();
        for (file_path, content) in &fake.files {
            let rest = match file_path.strip_prefix(&prefix) {
                Some(rest) => rest,
                None => continue,
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    dirs.insert(format!("{prefix}{dir}"));
                }
                None => entries.push(RemoteEntry {
                    path: file_path.clone(),
                    kind: EntryKind::File,
                    size: content.len() as u64,
                    sha: hash::blob_sha(content).to_hex(),
                }),
            }
        }

        if entries.is_empty() && dirs.is_empty() && !path.is_empty() {
            return Err(RemoteError::not_found(format!(
                "{} in {}",
                path,
                repo.full_name()
            )));
        }

        for dir in dirs {
            entries.push(RemoteEntry {
                path: dir,
                kind: EntryKind::Dir,
                size: 0,
                sha: String::new(),
            });
        }

        Ok(Contents::Dir(entries))
    }

    async fn read_blob(&self, repo: &RepoRef, path: &str) -> Result<Vec<u8>, RemoteError> {
        self.check_fail(path)?;

        let state = self.state.lock().unwrap();
        state
            .repos
            .get(&repo.full_name())
            .and_then(|fake| fake.files.get(path))
            .cloned()
            .ok_or_else(|| RemoteError::not_found(format!("{} in {}", path, repo.full_name())))
    }

    async fn create_file(
        &self,
        repo: &RepoRef,
        path: &str,
        _message: &str,
        content: &[u8],
    ) -> Result<(), RemoteError> {
        self.check_fail(path)?;

        let mut state = self.state.lock().unwrap();
        state.writes.push(format!("create {path}"));
        let fake = state
            .repos
            .get_mut(&repo.full_name())
            .ok_or_else(|| RemoteError::not_found(repo.full_name()))?;

        if fake.files.contains_key(path) {
            return Err(RemoteError::Status {
                code: 422,
                message: format!("'{path}' already exists"),
            });
        }
        fake.files.insert(path.to_string(), content.to_vec());
        Ok(())
    }

    async fn update_file(
        &self,
        repo: &RepoRef,
        path: &str,
        _message: &str,
        content: &[u8],
        expected_sha: &str,
    ) -> Result<(), RemoteError> {
        self.check_fail(path)?;

        let mut state = self.state.lock().unwrap();
        state.writes.push(format!("update {path}"));
        let fake = state
            .repos
            .get_mut(&repo.full_name())
            .ok_or_else(|| RemoteError::not_found(repo.full_name()))?;

        let current = fake
            .files
            .get(path)
            .ok_or_else(|| RemoteError::not_found(format!("{} in {}", path, repo.full_name())))?;

        if hash::blob_sha(current).to_hex() != expected_sha {
            return Err(RemoteError::Status {
                code: 409,
                message: format!("'{path}' does not match the expected content identifier"),
            });
        }
        fake.files.insert(path.to_string(), content.to_vec());
        Ok(())
    }

    async fn create_repository(&self, name: &str) -> Result<RepoInfo, RemoteError> {
        let full_name = format!("{}/{}", self.login, name);
        let mut state = self.state.lock().unwrap();
        state.writes.push(format!("create-repo {full_name}"));

        let repo = FakeRepo {
            default_branch: "main".to_string(),
            files: BTreeMap::new(),
        };
        let info = Self::repo_info_for(&full_name, &repo);
        state.repos.insert(full_name, repo);
        Ok(info)
    }
}
