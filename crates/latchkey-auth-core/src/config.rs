//! Configuration types for the authorization store

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl HashParams {
    /// Smallest parameters Argon2 accepts. Only for tests and benchmarks.
    pub fn insecure_fast() -> Self {
        Self {
            memory_kib: argon2::Params::MIN_M_COST.max(8),
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Auth core configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Password hashing cost
    pub hash: HashParams,
    /// Random bytes per session token / invite code (hex doubles the length)
    pub token_bytes: usize,
}

impl AuthConfig {
    /// Minimum random bytes in a token (128 bits)
    pub const MIN_TOKEN_BYTES: usize = 16;

    /// Default random bytes in a token (256 bits)
    pub const DEFAULT_TOKEN_BYTES: usize = 32;

    /// Create a config with default hashing cost and token length
    pub fn new() -> Self {
        Self {
            hash: HashParams::default(),
            token_bytes: Self::DEFAULT_TOKEN_BYTES,
        }
    }

    /// Set hashing cost
    pub fn with_hash_params(mut self, hash: HashParams) -> Self {
        self.hash = hash;
        self
    }

    /// Set token length, clamped to the minimum
    pub fn with_token_bytes(mut self, token_bytes: usize) -> Self {
        self.token_bytes = token_bytes.max(Self::MIN_TOKEN_BYTES);
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}
