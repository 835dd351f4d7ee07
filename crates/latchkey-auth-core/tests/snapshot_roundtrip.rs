//! Snapshot restore tests
//!
//! Serializing the full state and restoring it into a fresh store must
//! reproduce every verification result exactly.

mod common;

use common::{sign_up_user, store_with_admin, PlainHasher, ADMIN_PASSWORD};
use latchkey_auth_core::{AuthStore, OsTokenSource};
use latchkey_types::{Identity, SessionToken, StoreSnapshot};

#[test]
fn test_restored_store_reproduces_verification() {
    let (store, admin, admin_token) = store_with_admin();
    let a_token = sign_up_user(&store, &admin, &admin_token, "a@x", "goodpass1");
    let b_token = sign_up_user(&store, &admin, &admin_token, "b@x", "goodpass2");
    let a = Identity::from("a@x");
    let b = Identity::from("b@x");
    let a_second = store.sign_in(&a, "goodpass1").unwrap();
    store.sign_out(&b, &b_token).unwrap();
    let pending_code = store.issue_invite_code(&admin, &admin_token).unwrap();

    let probes = vec![
        (admin.clone(), admin_token.clone()),
        (a.clone(), a_token.clone()),
        (a.clone(), a_second.clone()),
        (b.clone(), b_token.clone()),
        (a.clone(), b_token.clone()),
        (Identity::from("ghost"), a_token.clone()),
        (admin.clone(), SessionToken::from("forged")),
    ];
    let expected: Vec<bool> = probes
        .iter()
        .map(|(id, token)| store.verify_token(id, token))
        .collect();

    let json = serde_json::to_vec(&store.snapshot()).unwrap();
    let restored_snapshot: StoreSnapshot = serde_json::from_slice(&json).unwrap();
    let restored = AuthStore::from_snapshot(restored_snapshot, PlainHasher, OsTokenSource::default());

    let actual: Vec<bool> = probes
        .iter()
        .map(|(id, token)| restored.verify_token(id, token))
        .collect();
    assert_eq!(actual, expected);
    assert_eq!(expected, vec![true, true, true, false, false, false, false]);

    // Admin designation, passwords and the pending invite code survive too
    assert_eq!(restored.admin(), Some(admin.clone()));
    assert!(restored.sign_in(&admin, ADMIN_PASSWORD).is_ok());
    assert!(restored
        .sign_up(Identity::from("c@x"), "goodpass3", &pending_code)
        .is_ok());
    assert_eq!(restored.stats().users, 4);
}

#[test]
fn test_snapshot_holds_no_plaintext_password() {
    let (store, admin, admin_token) = store_with_admin();
    sign_up_user(&store, &admin, &admin_token, "a@x", "supersecretpw");

    let json = serde_json::to_string(&store.snapshot()).unwrap();
    assert!(!json.contains("supersecretpw"));
    assert!(!json.contains(ADMIN_PASSWORD));
}
