//! Hash providers for commit hashes.
use sha2::{Digest, Sha256};

/// 32-byte hash, used for commit hashes and content roots.
pub type Hash32 = [u8; 32];

/// Hashing strategy used to commit to canonical metadata bytes.
///
/// Implementations must be deterministic; both sides of a commit/reveal pair
/// have to agree on the algorithm.
pub trait CommitHasher {
    /// Hashes a buffer of canonical metadata bytes.
    fn hash(buf: &[u8]) -> Hash32;
}

/// Single SHA-256, the default commit hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl CommitHasher for Sha256Hasher {
    fn hash(buf: &[u8]) -> Hash32 {
        Sha256::digest(buf).into()
    }
}

/// Returns the lowercase hex SHA-256 of a buffer, as used in file entries.
pub fn sha256_hex(buf: &[u8]) -> String {
    hex::encode(Sha256::digest(buf))
}
