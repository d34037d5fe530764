//! SHA-256 digests as lowercase hex strings.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of a byte slice, lowercase hex.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
