//! Random token generation
//!
//! Session tokens and invite codes are both drawn from a [`TokenSource`]. The
//! production source reads the operating system CSPRNG and hex-encodes the bytes.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::config::AuthConfig;

/// Source of unguessable opaque strings
pub trait TokenSource: Send + Sync {
    /// Produce a fresh token
    fn new_token(&self) -> String;
}

/// Token source backed by the OS random number generator
#[derive(Debug, Clone, Copy)]
pub struct OsTokenSource {
    bytes: usize,
}

impl OsTokenSource {
    /// Create a source producing `bytes` random bytes per token
    pub fn new(bytes: usize) -> Self {
        Self {
            bytes: bytes.max(AuthConfig::MIN_TOKEN_BYTES),
        }
    }

    /// Create a source from auth config
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.token_bytes)
    }
}

impl Default for OsTokenSource {
    fn default() -> Self {
        Self::new(AuthConfig::DEFAULT_TOKEN_BYTES)
    }
}

impl TokenSource for OsTokenSource {
    fn new_token(&self) -> String {
        let mut buf = vec![0u8; self.bytes];
        OsRng.fill_bytes(&mut buf);
        hex::encode(buf)
    }
}
