//! Authorization store
//!
//! Owns every identity's credential record and the set of outstanding invite
//! codes. All mutating operations take the write half of a single lock for
//! their full duration, which makes "invite code is outstanding → consume it →
//! create the record" and "identity is absent → insert it" indivisible.
//! [`AuthStore::verify_token`] only needs the read half.

use std::sync::OnceLock;

use latchkey_types::{CredentialRecord, Identity, InviteCode, SessionToken, StoreSnapshot};
use parking_lot::RwLock;

use crate::password::{validate_password, PasswordHasher};
use crate::token::TokenSource;
use crate::AuthError;

/// Counters describing the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub sessions: usize,
    pub outstanding_invites: usize,
}

/// In-memory credential and session authority
pub struct AuthStore<H: PasswordHasher, T: TokenSource> {
    state: RwLock<StoreSnapshot>,
    hasher: H,
    tokens: T,
    /// Hash verified against when the identity is unknown, so sign-in takes
    /// the same time whether or not the account exists
    dummy_hash: OnceLock<Option<String>>,
}

impl<H: PasswordHasher, T: TokenSource> AuthStore<H, T> {
    /// Create an empty store with no administrator
    pub fn new(hasher: H, tokens: T) -> Self {
        Self::from_snapshot(StoreSnapshot::default(), hasher, tokens)
    }

    /// Restore a store from persisted state
    pub fn from_snapshot(snapshot: StoreSnapshot, hasher: H, tokens: T) -> Self {
        Self {
            state: RwLock::new(snapshot),
            hasher,
            tokens,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Copy of the full state, for persistence
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.read().clone()
    }

    /// Current administrator, if one is designated
    pub fn admin(&self) -> Option<Identity> {
        self.state.read().admin.clone()
    }

    /// Current counters
    pub fn stats(&self) -> StoreStats {
        let state = self.state.read();
        StoreStats {
            users: state.user_count(),
            sessions: state.session_count(),
            outstanding_invites: state.invite_codes.len(),
        }
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Designate the administrator and mint a first invite code.
    ///
    /// Not reachable through the command table: this is how a fresh deployment
    /// gets an administrator who can then sign up like anyone else.
    pub fn bootstrap(&self, admin: Identity) -> InviteCode {
        let mut state = self.state.write();
        tracing::info!(admin = %admin, "Administrator designated");
        state.admin = Some(admin);
        self.mint_invite_code(&mut state)
    }

    // =========================================================================
    // Invite Codes
    // =========================================================================

    /// Issue a new invite code. Requires an active administrator session.
    pub fn issue_invite_code(
        &self,
        requester: &Identity,
        token: &SessionToken,
    ) -> Result<InviteCode, AuthError> {
        let mut state = self.state.write();
        authorize_admin(&state, requester, token)?;

        let code = self.mint_invite_code(&mut state);
        tracing::info!(
            admin = %requester,
            outstanding = state.invite_codes.len(),
            "Invite code issued"
        );
        Ok(code)
    }

    /// Revoke an invite code. Revoking an absent code is a no-op.
    pub fn revoke_invite_code(
        &self,
        requester: &Identity,
        token: &SessionToken,
        code: &InviteCode,
    ) -> Result<(), AuthError> {
        let mut state = self.state.write();
        authorize_admin(&state, requester, token)?;

        if state.invite_codes.remove(code) {
            tracing::info!(admin = %requester, "Invite code revoked");
        } else {
            tracing::debug!(admin = %requester, "Revoked invite code was not outstanding");
        }
        Ok(())
    }

    // =========================================================================
    // Accounts and Sessions
    // =========================================================================

    /// Register a new identity by consuming an invite code.
    ///
    /// Checks run in a fixed order: invite code, then identity, then password
    /// policy. Returns the first session token of the new identity.
    pub fn sign_up(
        &self,
        identity: Identity,
        password: &str,
        invite_code: &InviteCode,
    ) -> Result<SessionToken, AuthError> {
        let mut state = self.state.write();

        if !state.invite_codes.contains(invite_code) {
            tracing::debug!(identity = %identity, "Sign-up with unknown invite code");
            return Err(AuthError::InvalidInviteCode);
        }
        if state.users.contains_key(&identity) {
            tracing::debug!(identity = %identity, "Sign-up for existing identity");
            return Err(AuthError::IdentityExists);
        }
        validate_password(password)?;

        let password_hash = self.hasher.hash(password)?;
        let token = self.mint_session_token();

        state.invite_codes.remove(invite_code);
        state
            .users
            .insert(identity.clone(), CredentialRecord::new(password_hash, token.clone()));

        tracing::info!(identity = %identity, "Identity registered");
        Ok(token)
    }

    /// Authenticate by password and open an additional session
    pub fn sign_in(&self, identity: &Identity, password: &str) -> Result<SessionToken, AuthError> {
        let mut state = self.state.write();

        let Some(record) = state.users.get_mut(identity) else {
            self.equalize_timing(password);
            tracing::debug!(identity = %identity, "Sign-in failed");
            return Err(AuthError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &record.password_hash) {
            tracing::debug!(identity = %identity, "Sign-in failed");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.mint_session_token();
        record.tokens.insert(token.clone());

        tracing::info!(
            identity = %identity,
            sessions = record.tokens.len(),
            "Session opened"
        );
        Ok(token)
    }

    /// Revoke exactly one session. Other sessions of the identity stay valid.
    pub fn sign_out(&self, identity: &Identity, token: &SessionToken) -> Result<(), AuthError> {
        let mut state = self.state.write();

        let removed = state
            .users
            .get_mut(identity)
            .is_some_and(|record| record.tokens.remove(token));
        if !removed {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(identity = %identity, "Session closed");
        Ok(())
    }

    /// Replace the password of an identity holding an active session.
    ///
    /// Existing sessions, including the one used here, remain valid.
    pub fn change_password(
        &self,
        identity: &Identity,
        token: &SessionToken,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let mut state = self.state.write();

        let record = state
            .users
            .get_mut(identity)
            .filter(|record| record.tokens.contains(token))
            .ok_or(AuthError::InvalidCredentials)?;
        validate_password(new_password)?;

        record.password_hash = self.hasher.hash(new_password)?;

        tracing::info!(identity = %identity, "Password changed");
        Ok(())
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Whether `token` is currently an active session of `identity`
    pub fn verify_token(&self, identity: &Identity, token: &SessionToken) -> bool {
        let state = self.state.read();
        is_active(&state, identity, token)
    }

    /// Privileged verification on behalf of a relying party.
    ///
    /// The requester must hold an active administrator session.
    pub fn verify_token_as(
        &self,
        requester: &Identity,
        requester_token: &SessionToken,
        identity: &Identity,
        token: &SessionToken,
    ) -> Result<bool, AuthError> {
        let state = self.state.read();
        authorize_admin(&state, requester, requester_token)?;
        Ok(is_active(&state, identity, token))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn mint_session_token(&self) -> SessionToken {
        SessionToken::new(self.tokens.new_token())
    }

    fn mint_invite_code(&self, state: &mut StoreSnapshot) -> InviteCode {
        loop {
            let code = InviteCode::new(self.tokens.new_token());
            if state.invite_codes.insert(code.clone()) {
                return code;
            }
            tracing::warn!("Generated invite code collided with an outstanding one");
        }
    }

    fn equalize_timing(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.hasher.hash("latchkey-timing-equalizer").ok());
        if let Some(hash) = dummy {
            let _ = self.hasher.verify(password, hash);
        }
    }
}

/// Fresh state designating `admin` and holding one invite code.
///
/// Lets a deployment be seeded without building a store, which would need a
/// password hasher it never uses.
pub fn bootstrap_snapshot<T: TokenSource>(
    admin: Identity,
    tokens: &T,
) -> (StoreSnapshot, InviteCode) {
    let mut snapshot = StoreSnapshot::with_admin(admin);
    let code = InviteCode::new(tokens.new_token());
    snapshot.invite_codes.insert(code.clone());
    (snapshot, code)
}

fn is_active(state: &StoreSnapshot, identity: &Identity, token: &SessionToken) -> bool {
    state
        .users
        .get(identity)
        .is_some_and(|record| record.tokens.contains(token))
}

fn authorize_admin(
    state: &StoreSnapshot,
    requester: &Identity,
    token: &SessionToken,
) -> Result<(), AuthError> {
    let is_admin = state.admin.as_ref() == Some(requester);
    if is_admin && is_active(state, requester, token) {
        Ok(())
    } else {
        tracing::warn!(requester = %requester, "Administrator check failed");
        Err(AuthError::Unauthorized)
    }
}

impl<H: PasswordHasher, T: TokenSource> std::fmt::Debug for AuthStore<H, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
