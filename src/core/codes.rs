//! Coupon code generation.
//!
//! Codes are hex-encoded bytes drawn from the operating system's CSPRNG, so they cannot be
//! predicted from earlier output. Collisions are astronomically unlikely but still possible;
//! the store's unique constraint on `code` is the only authority on uniqueness.

use crate::config::settings::MIN_CODE_BYTES;
use rand::RngCore;
use rand::rngs::OsRng;

/// A source of candidate coupon codes.
pub trait CodeSource: Send + Sync {
    /// Returns a fresh candidate code.
    fn generate(&self) -> String;
}

/// Cryptographically random hex codes of a fixed length.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodes {
    bytes: usize,
}

impl RandomCodes {
    /// Creates a generator producing `bytes` random bytes per code (two hex characters each).
    /// Values below [`MIN_CODE_BYTES`] are raised to it.
    #[must_use]
    pub fn new(bytes: usize) -> Self {
        Self {
            bytes: bytes.max(MIN_CODE_BYTES),
        }
    }

    /// Length in characters of every generated code.
    #[must_use]
    pub const fn code_len(&self) -> usize {
        self.bytes * 2
    }
}

impl Default for RandomCodes {
    fn default() -> Self {
        Self::new(MIN_CODE_BYTES)
    }
}

impl CodeSource for RandomCodes {
    fn generate(&self) -> String {
        let mut buf = vec![0u8; self.bytes];
        OsRng.fill_bytes(&mut buf);
        hex::encode(buf)
    }
}
