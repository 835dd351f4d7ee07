//! Persisted data model
//!
//! The authorization store keeps exactly this structure in memory and the
//! persistence layer writes it out verbatim, so a restore reproduces every
//! verification result of the process that saved it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Identity, InviteCode, SessionToken};

/// Credentials held for one identity
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// One-way password hash (PHC string)
    pub password_hash: String,
    /// Active session tokens
    #[serde(default)]
    pub tokens: BTreeSet<SessionToken>,
}

impl CredentialRecord {
    /// Create a record with a single active token
    pub fn new(password_hash: String, token: SessionToken) -> Self {
        let mut tokens = BTreeSet::new();
        tokens.insert(token);
        Self {
            password_hash,
            tokens,
        }
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("active_tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}

/// Full authorization state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Identity allowed to issue and revoke invite codes
    #[serde(default)]
    pub admin: Option<Identity>,
    /// Credential records keyed by identity
    #[serde(default)]
    pub users: BTreeMap<Identity, CredentialRecord>,
    /// Outstanding (unconsumed) invite codes
    #[serde(default)]
    pub invite_codes: BTreeSet<InviteCode>,
}

impl StoreSnapshot {
    /// Empty state with the given administrator
    pub fn with_admin(admin: Identity) -> Self {
        Self {
            admin: Some(admin),
            ..Self::default()
        }
    }

    /// Number of registered identities
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of active sessions across all identities
    pub fn session_count(&self) -> usize {
        self.users.values().map(|r| r.tokens.len()).sum()
    }
}
