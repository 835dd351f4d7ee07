//! Common test utilities for latchkey-auth-core integration tests

#![allow(dead_code)]

use latchkey_auth_core::{AuthError, AuthStore, OsTokenSource, PasswordHasher};
use latchkey_types::{Identity, SessionToken};

/// Reversible stand-in hasher so tests don't pay Argon2 cost
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${}", hex::encode(password)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        self.hash(password).is_ok_and(|h| h == hash)
    }
}

pub type TestStore = AuthStore<PlainHasher, OsTokenSource>;

pub const ADMIN: &str = "root@example.com";
pub const ADMIN_PASSWORD: &str = "rootpass1";

/// Fresh store with no administrator
pub fn empty_store() -> TestStore {
    AuthStore::new(PlainHasher, OsTokenSource::default())
}

/// Store whose administrator has signed up; returns the admin session
pub fn store_with_admin() -> (TestStore, Identity, SessionToken) {
    let store = empty_store();
    let admin = Identity::from(ADMIN);
    let code = store.bootstrap(admin.clone());
    let token = store
        .sign_up(admin.clone(), ADMIN_PASSWORD, &code)
        .expect("admin sign-up");
    (store, admin, token)
}

/// Sign up a regular user through a freshly issued invite code
pub fn sign_up_user(
    store: &TestStore,
    admin: &Identity,
    admin_token: &SessionToken,
    identity: &str,
    password: &str,
) -> SessionToken {
    let code = store
        .issue_invite_code(admin, admin_token)
        .expect("issue invite code");
    store
        .sign_up(Identity::from(identity), password, &code)
        .expect("user sign-up")
}
