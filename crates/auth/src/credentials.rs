//! Password hashing seam and verification.
//!
//! The hash primitive is an external capability behind [`PasswordHasher`];
//! this module only stores digests and compares them in constant time.

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hex-encoded one-way digest of a password.
///
/// Never holds the cleartext; `Debug` prints the digest, which is safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One-way password hashing capability.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> PasswordHash;
}

/// SHA-256 hasher with hex output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> PasswordHash {
        let digest = Sha256::digest(password.as_bytes());
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hex, "{byte:02x}");
        }
        PasswordHash(hex)
    }
}

/// Compare a candidate password against a stored hash in constant time.
pub fn verify_password<H>(hasher: &H, stored: &PasswordHash, candidate: &str) -> bool
where
    H: PasswordHasher + ?Sized,
{
    let candidate = hasher.hash(candidate);
    bool::from(stored.0.as_bytes().ct_eq(candidate.0.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_verifies() {
        let hasher = Sha256PasswordHasher;
        let stored = hasher.hash("hunter2");
        assert!(verify_password(&hasher, &stored, "hunter2"));
    }

    #[test]
    fn different_password_fails() {
        let hasher = Sha256PasswordHasher;
        let stored = hasher.hash("hunter2");
        assert!(!verify_password(&hasher, &stored, "hunter3"));
        assert!(!verify_password(&hasher, &stored, ""));
    }

    #[test]
    fn hashing_is_deterministic_and_hex() {
        let hasher = Sha256PasswordHasher;
        let a = hasher.hash("pw");
        let b = hasher.hash("pw");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
