//! Authenticated GitHub REST client

use crate::types::{
    ApiError, ContentsResponse, RepoResponse, SearchResponse, UserResponse,
};
use async_trait::async_trait;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hubsync_core::{Contents, RemoteError, RemoteHost, RepoInfo, RepoRef, RepoSummary};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{header, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Characters escaped when a repository path is spliced into a URL path
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// GitHub REST client carrying the bearer credential.
///
/// Built once at startup and passed to operations as `&dyn RemoteHost`.
/// Every request runs under the client-wide timeout, so a hung remote call
/// surfaces as a per-path `Network` failure rather than stalling an
/// operation forever.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

#[derive(Serialize)]
struct WriteFileRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    has_issues: bool,
    has_wiki: bool,
    has_projects: bool,
}

impl GitHubClient {
    /// Build a client against the public GitHub API
    pub fn new(token: impl Into<String>) -> Result<Self, RemoteError> {
        Self::with_base_url(token, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Build a client against a custom endpoint (GitHub Enterprise, tests)
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hubsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| RemoteError::Network {
                reason: err.to_string(),
            })?;

        let base_url = Url::parse(base_url).map_err(|err| RemoteError::Decode {
            reason: format!("invalid base URL '{base_url}': {err}"),
        })?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url.join(path).map_err(|err| RemoteError::Decode {
            reason: format!("invalid endpoint '{path}': {err}"),
        })
    }

    fn contents_endpoint(repo: &RepoRef, path: &str) -> String {
        if path.is_empty() {
            format!("repos/{}/{}/contents", repo.owner, repo.name)
        } else {
            format!(
                "repos/{}/{}/contents/{}",
                repo.owner,
                repo.name,
                utf8_percent_encode(path, PATH_ESCAPE)
            )
        }
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", path);
        let resp = self
            .http
            .get(self.endpoint(path)?)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT_JSON)
            .query(query)
            .send()
            .await
            .map_err(into_network)?;
        decode_json(resp).await
    }

    async fn get_raw(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, RemoteError> {
        debug!("GET {} (raw)", path);
        let resp = self
            .http
            .get(self.endpoint(path)?)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT_RAW)
            .query(query)
            .send()
            .await
            .map_err(into_network)?;

        if resp.status().is_success() {
            let bytes = resp.bytes().await.map_err(into_network)?;
            Ok(bytes.to_vec())
        } else {
            Err(error_from_response(resp).await)
        }
    }

    async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), RemoteError> {
        debug!("PUT {}", path);
        let resp = self
            .http
            .put(self.endpoint(path)?)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT_JSON)
            .json(body)
            .send()
            .await
            .map_err(into_network)?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(resp).await)
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        debug!("POST {}", path);
        let resp = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT_JSON)
            .json(body)
            .send()
            .await
            .map_err(into_network)?;
        decode_json(resp).await
    }
}

#[async_trait]
impl RemoteHost for GitHubClient {
    async fn authenticated_login(&self) -> Result<String, RemoteError> {
        let user: UserResponse = self.get_json("user", &[]).await?;
        Ok(user.login)
    }

    async fn search_repositories(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RepoSummary>, RemoteError> {
        let per_page = limit.clamp(1, 100).to_string();
        let resp: SearchResponse = self
            .get_json("search/repositories", &[("q", query), ("per_page", &per_page)])
            .await?;
        Ok(resp
            .items
            .into_iter()
            .take(limit)
            .map(|item| item.into_summary())
            .collect())
    }

    async fn repo_info(&self, owner: &str, name: &str) -> Result<RepoInfo, RemoteError> {
        let repo: RepoResponse = self
            .get_json(&format!("repos/{owner}/{name}"), &[])
            .await?;
        Ok(repo.into_info())
    }

    async fn contents(&self, repo: &RepoRef, path: &str) -> Result<Contents, RemoteError> {
        let resp: ContentsResponse = self
            .get_json(
                &Self::contents_endpoint(repo, path),
                &[("ref", repo.branch.as_str())],
            )
            .await?;
        Ok(resp.into_contents())
    }

    async fn read_blob(&self, repo: &RepoRef, path: &str) -> Result<Vec<u8>, RemoteError> {
        self.get_raw(
            &Self::contents_endpoint(repo, path),
            &[("ref", repo.branch.as_str())],
        )
        .await
    }

    async fn create_file(
        &self,
        repo: &RepoRef,
        path: &str,
        message: &str,
        content: &[u8],
    ) -> Result<(), RemoteError> {
        let body = WriteFileRequest {
            message,
            content: BASE64_STANDARD.encode(content),
            branch: &repo.branch,
            sha: None,
        };
        self.put_json(&Self::contents_endpoint(repo, path), &body)
            .await
    }

    async fn update_file(
        &self,
        repo: &RepoRef,
        path: &str,
        message: &str,
        content: &[u8],
        expected_sha: &str,
    ) -> Result<(), RemoteError> {
        let body = WriteFileRequest {
            message,
            content: BASE64_STANDARD.encode(content),
            branch: &repo.branch,
            sha: Some(expected_sha),
        };
        self.put_json(&Self::contents_endpoint(repo, path), &body)
            .await
    }

    async fn create_repository(&self, name: &str) -> Result<RepoInfo, RemoteError> {
        let body = CreateRepoRequest {
            name,
            description: "",
            private: false,
            has_issues: true,
            has_wiki: true,
            has_projects: true,
        };
        let repo: RepoResponse = self.post_json("user/repos", &body).await?;
        Ok(repo.into_info())
    }
}

fn into_network(err: reqwest::Error) -> RemoteError {
    RemoteError::Network {
        reason: err.to_string(),
    }
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, RemoteError> {
    if resp.status().is_success() {
        resp.json::<T>().await.map_err(|err| RemoteError::Decode {
            reason: err.to_string(),
        })
    } else {
        Err(error_from_response(resp).await)
    }
}

async fn error_from_response(resp: Response) -> RemoteError {
    let status = resp.status();
    let rate_limit_exhausted = resp
        .headers()
        .get(RATE_LIMIT_REMAINING)
        .and_then(|value| value.to_str().ok())
        .map(|remaining| remaining == "0")
        .unwrap_or(false);

    let body = resp
        .text()
        .await
        .unwrap_or_else(|err| format!("failed to read error body: {err}"));

    // GitHub wraps errors as {"message": ...}; surface just the message
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|api| api.message)
        .unwrap_or(body);

    classify_status(status, rate_limit_exhausted, message)
}

fn classify_status(status: StatusCode, rate_limit_exhausted: bool, message: String) -> RemoteError {
    match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound { reason: message },
        StatusCode::UNAUTHORIZED => RemoteError::Unauthorized { reason: message },
        StatusCode::FORBIDDEN if rate_limit_exhausted => {
            RemoteError::RateLimited { reason: message }
        }
        StatusCode::FORBIDDEN => RemoteError::Forbidden { reason: message },
        StatusCode::TOO_MANY_REQUESTS => RemoteError::RateLimited { reason: message },
        _ => RemoteError::Status {
            code: status.as_u16(),
            message,
        },
    }
}
