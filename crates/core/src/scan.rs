//! Local tree scanning

use crate::error::SyncError;
use crate::ignore::IgnoreRules;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Recursively enumerate regular files under `base_dir`, keyed by their
/// forward-slash relative path. Ignored paths never enter the mapping.
///
/// Filesystem errors abort the scan: failing to read the local tree means
/// the invocation itself is wrong, unlike remote listing failures which are
/// tolerated per subtree.
pub fn scan_local_tree(
    base_dir: &Path,
    rules: &IgnoreRules,
) -> Result<BTreeMap<String, PathBuf>, SyncError> {
    let mut files = BTreeMap::new();

    for entry in WalkDir::new(base_dir).follow_links(false) {
        let entry = entry.map_err(|err| SyncError::Scan {
            path: base_dir.to_path_buf(),
            source: err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected")),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = match entry.path().strip_prefix(base_dir) {
            Ok(rel) => to_slash(rel),
            Err(_) => continue,
        };

        if rules.is_ignored(&rel_path) {
            debug!("Ignoring local file {}", rel_path);
            continue;
        }

        files.insert(rel_path, entry.path().to_path_buf());
    }

    Ok(files)
}

/// Join path components with `/`, the remote's separator, regardless of host OS
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
