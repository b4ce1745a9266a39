//! Integration tests driving the sync engine against an in-memory host

mod common;

use common::FakeHost;
use hubsync_core::{
    compare, pull, push, resolve_repo, walk_remote_tree, RepoPath, RepoRef, SyncError,
};
use std::fs;
use tempfile::TempDir;

fn repo_ref(full_name: &str) -> RepoRef {
    RepoPath::parse(full_name).unwrap().at("main")
}

#[tokio::test]
async fn walk_maps_nested_files_to_identifiers() {
    let host = FakeHost::new("me");
    host.add_repo(
        "me/proj",
        &[
            ("README.md", b"# proj\n".as_slice()),
            ("src/main.rs", b"fn main() {}\n".as_slice()),
            ("src/deep/mod.rs", b"".as_slice()),
        ],
    );

    let tree = walk_remote_tree(&host, &repo_ref("me/proj")).await;

    let paths: Vec<_> = tree.keys().cloned().collect();
    assert_eq!(paths, vec!["README.md", "src/deep/mod.rs", "src/main.rs"]);
    assert_eq!(
        tree["README.md"],
        hubsync_core::hash::blob_sha(b"# proj\n").to_hex()
    );
}

#[tokio::test]
async fn walk_omits_failing_subtree_but_keeps_siblings() {
    let host = FakeHost::new("me")
        .fail_on("src");
    host.add_repo(
        "me/proj",
        &[
            ("README.md", b"# proj\n".as_slice()),
            ("docs/guide.md", b"guide\n".as_slice()),
            ("src/main.rs", b"fn main() {}\n".as_slice()),
        ],
    );

    let tree = walk_remote_tree(&host, &repo_ref("me/proj")).await;

    assert!(tree.contains_key("README.md"));
    assert!(tree.contains_key("docs/guide.md"));
    assert!(!tree.contains_key("src/main.rs"));
}

#[tokio::test]
async fn resolve_repo_falls_back_to_default_branch() {
    let host = FakeHost::new("me");
    host.add_repo("me/proj", &[]);

    let (info, repo) = resolve_repo(&host, "me/proj", "").await.unwrap();
    assert_eq!(info.default_branch, "main");
    assert_eq!(repo.branch, "main");

    let (_, repo) = resolve_repo(&host, "me/proj", "dev").await.unwrap();
    assert_eq!(repo.branch, "dev");
}

#[tokio::test]
async fn pull_writes_remote_files_binary_exact() {
    let host = FakeHost::new("me");
    host.add_repo(
        "me/proj",
        &[
            ("a.txt", b"alpha\n".as_slice()),
            ("src/main.rs", b"fn main() {}\n".as_slice()),
            ("bin/data", [0u8, 159, 146, 150].as_slice()),
        ],
    );

    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("checkout");
    let outcome = pull(&host, &repo_ref("me/proj"), &target).await.unwrap();

    assert_eq!(outcome.added, vec!["a.txt", "bin/data", "src/main.rs"]);
    assert!(outcome.updated.is_empty());
    assert!(outcome.errors.is_empty());
    assert_eq!(fs::read(target.join("a.txt")).unwrap(), b"alpha\n");
    assert_eq!(fs::read(target.join("bin/data")).unwrap(), [0u8, 159, 146, 150]);
}

#[tokio::test]
async fn pull_reports_existing_files_as_updated() {
    let host = FakeHost::new("me");
    host.add_repo("me/proj", &[("a.txt", b"new\n".as_slice())]);

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), b"old\n").unwrap();

    let outcome = pull(&host, &repo_ref("me/proj"), temp_dir.path()).await.unwrap();

    assert!(outcome.added.is_empty());
    assert_eq!(outcome.updated, vec!["a.txt"]);
    assert_eq!(fs::read(temp_dir.path().join("a.txt")).unwrap(), b"new\n");
}

#[tokio::test]
async fn pull_respects_local_ignore_rules() {
    let host = FakeHost::new("me");
    host.add_repo(
        "me/proj",
        &[("a.txt", b"keep\n".as_slice()), ("b.log", b"drop\n".as_slice())],
    );

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".gitignore"), "*.log\n").unwrap();

    let outcome = pull(&host, &repo_ref("me/proj"), temp_dir.path()).await.unwrap();

    assert_eq!(outcome.added, vec!["a.txt"]);
    assert!(!temp_dir.path().join("b.log").exists());
}

#[tokio::test]
async fn pull_isolates_per_file_fetch_failures() {
    let host = FakeHost::new("me").fail_on("bad.txt");
    host.add_repo(
        "me/proj",
        &[
            ("a.txt", b"a\n".as_slice()),
            ("bad.txt", b"unreachable\n".as_slice()),
            ("c.txt", b"c\n".as_slice()),
        ],
    );

    let temp_dir = TempDir::new().unwrap();
    let outcome = pull(&host, &repo_ref("me/proj"), temp_dir.path()).await.unwrap();

    assert_eq!(outcome.added, vec!["a.txt", "c.txt"]);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].path, "bad.txt");
    assert!(!temp_dir.path().join("bad.txt").exists());
}

#[tokio::test]
async fn pull_then_compare_round_trips_clean() {
    let host = FakeHost::new("me");
    host.add_repo(
        "me/proj",
        &[
            ("README.md", b"# proj\n".as_slice()),
            ("src/lib.rs", b"pub fn f() {}\n".as_slice()),
        ],
    );

    let temp_dir = TempDir::new().unwrap();
    let repo = repo_ref("me/proj");
    pull(&host, &repo, temp_dir.path()).await.unwrap();

    let report = compare(&host, &repo, temp_dir.path()).await.unwrap();

    assert!(report.in_sync(), "expected clean round trip: {report:?}");
    assert_eq!(report.identical, vec!["README.md", "src/lib.rs"]);
}

#[tokio::test]
async fn compare_classifies_ignored_and_differing_paths() {
    // Local a.txt says "hi", remote says "bye"; remote b.txt is ignored locally
    let host = FakeHost::new("me");
    host.add_repo(
        "me/proj",
        &[("a.txt", b"bye".as_slice()), ("b.txt", b"remote only".as_slice())],
    );

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), b"hi").unwrap();
    fs::write(temp_dir.path().join(".gitignore"), "b.txt\n").unwrap();

    let report = compare(&host, &repo_ref("me/proj"), temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.differs, vec!["a.txt"]);
    assert!(report.remote_only.is_empty());
    assert!(report.local_only.is_empty());
    assert!(report.identical.is_empty());
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn compare_requires_existing_local_dir() {
    let host = FakeHost::new("me");
    host.add_repo("me/proj", &[]);

    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let result = compare(&host, &repo_ref("me/proj"), &missing).await;
    assert!(matches!(result, Err(SyncError::LocalDirMissing { .. })));
}

#[tokio::test]
async fn push_creates_updates_and_skips_by_content() {
    let host = FakeHost::new("me");
    host.add_repo(
        "me/proj",
        &[
            ("same.txt", b"unchanged\n".as_slice()),
            ("stale.txt", b"old\n".as_slice()),
        ],
    );

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("same.txt"), b"unchanged\n").unwrap();
    fs::write(temp_dir.path().join("stale.txt"), b"new\n").unwrap();
    fs::write(temp_dir.path().join("fresh.txt"), b"brand new\n").unwrap();

    let outcome = push(&host, "me/proj", temp_dir.path(), "sync", "")
        .await
        .unwrap();

    assert_eq!(outcome.added, vec!["fresh.txt"]);
    assert_eq!(outcome.updated, vec!["stale.txt"]);
    assert_eq!(outcome.skipped, vec!["same.txt"]);
    assert!(outcome.errors.is_empty());

    let files = host.files("me/proj");
    assert_eq!(files["stale.txt"], b"new\n");
    assert_eq!(files["fresh.txt"], b"brand new\n");
}

#[tokio::test]
async fn push_twice_performs_zero_updates() {
    let host = FakeHost::new("me");
    host.add_repo("me/proj", &[]);

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), b"a\n").unwrap();
    fs::write(temp_dir.path().join("b.txt"), b"b\n").unwrap();

    let first = push(&host, "me/proj", temp_dir.path(), "sync", "")
        .await
        .unwrap();
    assert_eq!(first.added, vec!["a.txt", "b.txt"]);

    let second = push(&host, "me/proj", temp_dir.path(), "sync", "")
        .await
        .unwrap();
    assert!(second.added.is_empty());
    assert!(second.updated.is_empty());
    assert_eq!(second.skipped, vec!["a.txt", "b.txt"]);
}

#[tokio::test]
async fn push_rejects_foreign_owner_before_any_write() {
    let host = FakeHost::new("me");

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), b"a\n").unwrap();

    let result = push(&host, "someone-else/repo", temp_dir.path(), "init", "").await;

    assert!(matches!(result, Err(SyncError::OwnershipMismatch { .. })));
    assert!(host.writes().is_empty(), "no write may reach the remote");
}

#[tokio::test]
async fn push_creates_missing_repository_and_readme() {
    let host = FakeHost::new("me");

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("main.rs"), b"fn main() {}\n").unwrap();

    let outcome = push(&host, "me/newproj", temp_dir.path(), "init", "")
        .await
        .unwrap();

    assert!(outcome.created_repository);
    assert!(outcome.created_readme);
    assert_eq!(outcome.added, vec!["main.rs"]);

    let files = host.files("me/newproj");
    assert_eq!(files["README.md"], b"# newproj\n");
    assert_eq!(files["main.rs"], b"fn main() {}\n");
}

#[tokio::test]
async fn push_keeps_local_readme_over_synthesized_one() {
    let host = FakeHost::new("me");

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("README.md"), b"# custom\n").unwrap();

    let outcome = push(&host, "me/newproj", temp_dir.path(), "init", "")
        .await
        .unwrap();

    assert!(outcome.created_repository);
    assert!(!outcome.created_readme);
    assert_eq!(host.files("me/newproj")["README.md"], b"# custom\n");
}

#[tokio::test]
async fn push_empty_directory_is_reported_noop() {
    let host = FakeHost::new("me");
    host.add_repo("me/proj", &[]);

    let temp_dir = TempDir::new().unwrap();
    let outcome = push(&host, "me/proj", temp_dir.path(), "init", "")
        .await
        .unwrap();

    assert!(outcome.is_noop());
    assert!(!outcome.created_repository);
    assert!(host.writes().is_empty());
}

#[tokio::test]
async fn push_isolates_per_file_write_failures() {
    let host = FakeHost::new("me").fail_on("flaky.txt");
    host.add_repo("me/proj", &[]);

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("flaky.txt"), b"x\n").unwrap();
    fs::write(temp_dir.path().join("ok.txt"), b"y\n").unwrap();

    let outcome = push(&host, "me/proj", temp_dir.path(), "sync", "")
        .await
        .unwrap();

    assert_eq!(outcome.added, vec!["ok.txt"]);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].path, "flaky.txt");
    assert!(host.files("me/proj").contains_key("ok.txt"));
}

#[tokio::test]
async fn push_missing_local_dir_is_input_error() {
    let host = FakeHost::new("me");
    host.add_repo("me/proj", &[]);

    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let result = push(&host, "me/proj", &missing, "init", "").await;
    assert!(matches!(result, Err(SyncError::LocalDirMissing { .. })));
    assert!(host.writes().is_empty());
}

#[tokio::test]
async fn push_rejects_malformed_repo_path() {
    let host = FakeHost::new("me");

    let temp_dir = TempDir::new().unwrap();
    let result = push(&host, "not-a-repo-path", temp_dir.path(), "init", "").await;

    assert!(matches!(result, Err(SyncError::InvalidRepoPath { .. })));
}
