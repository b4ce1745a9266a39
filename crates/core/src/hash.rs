//! Git blob content identifiers
//!
//! The remote addresses file content by its git blob SHA-1: the digest of
//! `"blob {len}\0"` followed by the raw bytes. Computing the identifier
//! locally lets the push driver recognize unchanged files without fetching
//! their blobs back.

use sha1::{Digest, Sha1};

/// A git blob SHA-1 (20 bytes)
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BlobSha([u8; 20]);

impl BlobSha {
    /// Create a new BlobSha from raw digest bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the digest as a byte slice
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to lowercase hex, the form the remote reports
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for BlobSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlobSha({})", self.to_hex())
    }
}

impl std::fmt::Display for BlobSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Compute the git blob SHA-1 for file content
pub fn blob_sha(data: &[u8]) -> BlobSha {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", data.len()).as_bytes());
    hasher.update(data);
    BlobSha(hasher.finalize().into())
}

/// Check content against a remote content identifier in hex form
pub fn matches_sha(data: &[u8], sha_hex: &str) -> bool {
    blob_sha(data).to_hex().eq_ignore_ascii_case(sha_hex)
}
