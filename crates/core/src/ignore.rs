//! Ignore pattern filtering for sync operations
//!
//! Patterns come from an optional `.gitignore` at the operation's local
//! directory plus built-in defaults. The defaults are appended after any
//! file-provided patterns and are always active, so secrets and VCS metadata
//! can never be un-ignored. The same rule set filters local scans, pulls,
//! pushes, and comparisons: what counts as synced is one shared policy.

use globset::{Glob, GlobMatcher};
use std::path::Path;
use tracing::warn;

/// Always-ignored patterns, appended after any source-provided ones.
///
/// `.gitignore` itself configures the sync and never participates in it.
const DEFAULT_PATTERNS: &[&str] = &[
    ".git/",
    ".gitignore",
    ".env",
    ".venv/",
    "__pycache__/",
    "*.pyc",
    "*.pyo",
];

enum Rule {
    /// Trailing-slash pattern: matches the directory itself and everything under it
    Dir(String),
    /// Shell glob matched against the full forward-slash relative path
    Glob(GlobMatcher),
}

/// Ordered, immutable set of ignore rules for one operation
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

impl IgnoreRules {
    /// Load rules for a local directory, reading `.gitignore` when present.
    ///
    /// Blank lines and `#` comments are skipped. A missing ignore file
    /// yields the defaults only; there is no error path here.
    pub fn load(base_dir: &Path) -> Self {
        let mut patterns = Vec::new();

        if let Ok(content) = std::fs::read_to_string(base_dir.join(".gitignore")) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                patterns.push(line.to_string());
            }
        }

        Self::from_patterns(&patterns)
    }

    /// Compile explicit patterns; the defaults are appended last
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut rules = Vec::new();

        let all = patterns
            .iter()
            .map(|p| p.as_ref())
            .chain(DEFAULT_PATTERNS.iter().copied());

        for pattern in all {
            if let Some(dir) = pattern.strip_suffix('/') {
                rules.push(Rule::Dir(dir.to_string()));
            } else {
                match Glob::new(pattern) {
                    Ok(glob) => rules.push(Rule::Glob(glob.compile_matcher())),
                    Err(err) => warn!("Skipping invalid ignore pattern '{}': {}", pattern, err),
                }
            }
        }

        Self { rules }
    }

    /// Check whether a repository-relative path is ignored
    pub fn is_ignored(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| match rule {
            Rule::Dir(dir) => match path.strip_prefix(dir.as_str()) {
                Some("") => true,
                Some(rest) => rest.starts_with('/'),
                None => false,
            },
            Rule::Glob(glob) => glob.is_match(path),
        })
    }
}
