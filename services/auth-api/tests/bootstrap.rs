//! Tests for first-run bootstrap.

use auth_api::bootstrap::{bootstrap, BootstrapError};
use latchkey_auth_core::{Argon2Hasher, AuthStore, HashParams, OsTokenSource};
use latchkey_db::{DbError, FileSnapshotRepository, MemorySnapshotRepository, SnapshotRepository};
use latchkey_types::{Identity, StoreSnapshot};
use tempfile::TempDir;

const ADMIN: &str = "root@example.com";

fn file_repo(dir: &TempDir) -> FileSnapshotRepository {
    FileSnapshotRepository::new(dir.path().join("auth.json"))
}

#[tokio::test]
async fn test_bootstrap_writes_admin_and_code() {
    let dir = TempDir::new().unwrap();
    let repo = file_repo(&dir);

    let code = bootstrap(&repo, &OsTokenSource::default(), ADMIN, false)
        .await
        .unwrap();

    let snapshot = repo.load().await.unwrap().unwrap();
    assert_eq!(snapshot.admin, Some(Identity::from(ADMIN)));
    assert!(snapshot.users.is_empty());
    assert_eq!(snapshot.invite_codes.len(), 1);
    assert!(snapshot.invite_codes.contains(&code));
    assert_eq!(code.as_str().len(), 64);
}

#[tokio::test]
async fn test_bootstrap_code_admits_the_admin() {
    let dir = TempDir::new().unwrap();
    let repo = file_repo(&dir);
    let code = bootstrap(&repo, &OsTokenSource::default(), ADMIN, false)
        .await
        .unwrap();

    let snapshot = repo.load().await.unwrap().unwrap();
    let hasher = Argon2Hasher::new(HashParams::insecure_fast()).unwrap();
    let store = AuthStore::from_snapshot(snapshot, hasher, OsTokenSource::default());
    let admin = Identity::from(ADMIN);
    let token = store.sign_up(admin.clone(), "rootpass1", &code).unwrap();

    assert!(store.issue_invite_code(&admin, &token).is_ok());
}

#[tokio::test]
async fn test_bootstrap_refuses_existing_file() {
    let dir = TempDir::new().unwrap();
    let repo = file_repo(&dir);
    let first = bootstrap(&repo, &OsTokenSource::default(), ADMIN, false)
        .await
        .unwrap();

    let err = bootstrap(&repo, &OsTokenSource::default(), "other@example.com", false)
        .await
        .unwrap_err();
    assert!(matches!(err, BootstrapError::Db(DbError::AlreadyExists(_))));

    let snapshot = repo.load().await.unwrap().unwrap();
    assert!(snapshot.invite_codes.contains(&first));
}

#[tokio::test]
async fn test_bootstrap_force_replaces_file() {
    let dir = TempDir::new().unwrap();
    let repo = file_repo(&dir);
    bootstrap(&repo, &OsTokenSource::default(), ADMIN, false)
        .await
        .unwrap();

    bootstrap(&repo, &OsTokenSource::default(), "other@example.com", true)
        .await
        .unwrap();

    let snapshot = repo.load().await.unwrap().unwrap();
    assert_eq!(snapshot.admin, Some(Identity::from("other@example.com")));
}

#[tokio::test]
async fn test_bootstrap_keeps_existing_accounts_without_force() {
    let existing = StoreSnapshot::with_admin(Identity::from(ADMIN));
    let repo = MemorySnapshotRepository::with_snapshot(existing.clone());

    let err = bootstrap(&repo, &OsTokenSource::default(), "other@example.com", false)
        .await
        .unwrap_err();
    assert!(matches!(err, BootstrapError::Db(DbError::AlreadyExists(_))));
    assert_eq!(repo.current(), Some(existing));
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn test_bootstrap_rejects_untrimmed_admin() {
    for admin in ["", " root@example.com", "root@example.com\n", "\t"] {
        let repo = MemorySnapshotRepository::new();
        let err = bootstrap(&repo, &OsTokenSource::default(), admin, false)
            .await
            .unwrap_err();
        assert!(
            matches!(err, BootstrapError::InvalidAdmin(ref a) if a == admin),
            "{admin:?} should be rejected"
        );
        assert!(repo.current().is_none());
    }
}
