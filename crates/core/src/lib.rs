//! Synchronization engine for hubsync
//!
//! This crate implements the pure engine: ignore-pattern filtering, local
//! tree scanning, remote tree traversal, structural reconciliation, and the
//! pull/push drivers. The remote host is an injected capability ([`RemoteHost`]),
//! so everything here can be driven against an in-memory fake in tests.

pub mod error;
pub mod hash;
pub mod ignore;
pub mod reconcile;
pub mod remote;
pub mod scan;
pub mod sync;
pub mod walk;

pub use error::{RemoteError, SyncError};
pub use ignore::IgnoreRules;
pub use reconcile::{reconcile, DiffReport, FileError};
pub use remote::{
    resolve_repo, Contents, EntryKind, FileEntry, RemoteEntry, RemoteHost, RepoInfo, RepoPath,
    RepoRef, RepoSummary,
};
pub use scan::scan_local_tree;
pub use sync::{compare, pull, push, SyncOutcome};
pub use walk::walk_remote_tree;
