//! Structural reconciliation between a local and a remote tree

use crate::ignore::IgnoreRules;
use crate::remote::{RemoteHost, RepoRef};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A per-path failure recorded during an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub path: String,
    pub message: String,
}

impl FileError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Four disjoint path classifications plus per-path comparison failures.
///
/// Every non-ignored path present in either input mapping lands in exactly
/// one of the four sets or the error list. Input mappings are ordered, so
/// each list comes out sorted without a separate pass.
#[derive(Debug, Default)]
pub struct DiffReport {
    /// Present remotely, absent locally
    pub remote_only: Vec<String>,
    /// Present locally, absent remotely
    pub local_only: Vec<String>,
    /// Present on both sides with different bytes
    pub differs: Vec<String>,
    /// Present on both sides with identical bytes
    pub identical: Vec<String>,
    /// Paths that could not be compared
    pub errors: Vec<FileError>,
}

impl DiffReport {
    /// True when both sides hold identical content everywhere
    pub fn in_sync(&self) -> bool {
        self.remote_only.is_empty()
            && self.local_only.is_empty()
            && self.differs.is_empty()
            && self.errors.is_empty()
    }
}

/// Classify every non-ignored path from the two mappings.
///
/// Content comparison is byte-exact — no line-ending or encoding
/// normalization — matching the pull/push round-trip guarantee. A read
/// failure on either side records the path in `errors` and keeps it out of
/// the four sets rather than guessing a classification.
pub async fn reconcile(
    host: &dyn RemoteHost,
    repo: &RepoRef,
    local: &BTreeMap<String, PathBuf>,
    remote: &BTreeMap<String, String>,
    rules: &IgnoreRules,
) -> DiffReport {
    let mut report = DiffReport::default();

    for path in remote.keys() {
        if rules.is_ignored(path) {
            continue;
        }
        if !local.contains_key(path) {
            report.remote_only.push(path.clone());
        }
    }

    for (path, location) in local {
        if rules.is_ignored(path) {
            continue;
        }
        if !remote.contains_key(path) {
            report.local_only.push(path.clone());
            continue;
        }

        let local_bytes = match std::fs::read(location) {
            Ok(bytes) => bytes,
            Err(err) => {
                report
                    .errors
                    .push(FileError::new(path, format!("failed to read local file: {err}")));
                continue;
            }
        };

        match host.read_blob(repo, path).await {
            Ok(remote_bytes) if remote_bytes == local_bytes => report.identical.push(path.clone()),
            Ok(_) => report.differs.push(path.clone()),
            Err(err) => report
                .errors
                .push(FileError::new(path, format!("failed to fetch remote content: {err}"))),
        }
    }

    report
}
