//! First-run setup
//!
//! A fresh deployment has no administrator and no invite codes, so nobody
//! could sign up. Bootstrapping writes a snapshot that designates the
//! administrator and holds one invite code, which the administrator then
//! spends on their own sign-up.

use latchkey_auth_core::{bootstrap_snapshot, TokenSource};
use latchkey_db::{DbError, SnapshotRepository};
use latchkey_types::{Identity, InviteCode};

/// Bootstrap errors
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Identities are matched byte for byte, so surrounding whitespace would
    /// become part of the administrator's name
    #[error("invalid administrator identity {0:?}: must be non-empty without surrounding whitespace")]
    InvalidAdmin(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Write a bootstrap snapshot and return its invite code.
///
/// Refuses to replace an existing snapshot unless `force` is set.
pub async fn bootstrap<T: TokenSource>(
    repo: &dyn SnapshotRepository,
    tokens: &T,
    admin: &str,
    force: bool,
) -> Result<InviteCode, BootstrapError> {
    if admin.is_empty() || admin.trim() != admin {
        return Err(BootstrapError::InvalidAdmin(admin.to_string()));
    }

    let (snapshot, code) = bootstrap_snapshot(Identity::from(admin), tokens);
    if force {
        repo.save(&snapshot).await?;
    } else {
        repo.create(&snapshot).await?;
    }
    Ok(code)
}
