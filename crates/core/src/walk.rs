//! Remote tree traversal

use crate::remote::{Contents, EntryKind, RemoteHost, RepoRef};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Walk the remote tree at the branch tip, mapping each file path to its
/// content identifier.
///
/// Traversal uses an explicit work queue instead of recursion, keeping
/// stack depth flat however deep the tree goes. A failure listing one
/// directory is logged and that subtree omitted; siblings still complete.
/// No ignore filtering happens here — callers apply the shared rule set so
/// both sides of a sync are filtered by one policy.
pub async fn walk_remote_tree(host: &dyn RemoteHost, repo: &RepoRef) -> BTreeMap<String, String> {
    let mut tree = BTreeMap::new();
    let mut pending = vec![String::new()];

    while let Some(dir) = pending.pop() {
        match host.contents(repo, &dir).await {
            Ok(Contents::Dir(entries)) => {
                for entry in entries {
                    match entry.kind {
                        EntryKind::Dir => pending.push(entry.path),
                        EntryKind::File => {
                            tree.insert(entry.path, entry.sha);
                        }
                        EntryKind::Symlink | EntryKind::Submodule => {
                            // No blob content to sync
                            debug!("Skipping non-blob entry {}", entry.path);
                        }
                    }
                }
            }
            Ok(Contents::File(file)) => {
                tree.insert(file.path, file.sha);
            }
            Err(err) => {
                warn!("Error accessing remote path '{}': {}", dir, err);
            }
        }
    }

    tree
}
