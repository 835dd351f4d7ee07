//! Repository traits
//!
//! The whole authorization state is persisted as one document, so there is a
//! single repository with whole-snapshot load and save.

use async_trait::async_trait;
use latchkey_types::StoreSnapshot;

use crate::error::DbResult;

/// Snapshot repository trait
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Load the persisted snapshot, `None` if nothing was ever saved
    async fn load(&self) -> DbResult<Option<StoreSnapshot>>;

    /// Durably replace the persisted snapshot.
    ///
    /// When this returns `Ok` the snapshot survives a crash.
    async fn save(&self, snapshot: &StoreSnapshot) -> DbResult<()>;

    /// Save a snapshot only if none exists yet
    async fn create(&self, snapshot: &StoreSnapshot) -> DbResult<()>;
}
