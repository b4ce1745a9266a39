//! Error types for the sync engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the remote host capability.
///
/// The github crate maps HTTP responses into these variants; the engine only
/// inspects [`RemoteError::is_not_found`] (to drive the create-repository
/// path) and otherwise passes them through to the caller or records them as
/// per-file failures.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("not found: {reason}")]
    NotFound { reason: String },

    #[error("authentication failed: {reason}")]
    Unauthorized { reason: String },

    #[error("permission denied: {reason}")]
    Forbidden { reason: String },

    #[error("rate limited: {reason}")]
    RateLimited { reason: String },

    #[error("remote returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("failed to decode remote response: {reason}")]
    Decode { reason: String },
}

impl RemoteError {
    /// Build a `NotFound` error.
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    /// True when the remote reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors that abort a whole operation before or instead of producing an
/// outcome. Per-file failures never take this path; they accumulate in the
/// outcome's error list.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid repository path '{path}': expected 'owner/repo'")]
    InvalidRepoPath { path: String },

    #[error("local directory '{path}' does not exist")]
    LocalDirMissing { path: PathBuf },

    #[error(
        "cannot create '{owner}/{name}': repositories can only be created \
         under the authenticated account '{login}'"
    )]
    OwnershipMismatch {
        owner: String,
        name: String,
        login: String,
    },

    #[error("failed to scan local tree at '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
