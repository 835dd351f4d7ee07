//! In-memory snapshot repository for tests

use std::sync::Arc;

use async_trait::async_trait;
use latchkey_types::StoreSnapshot;
use parking_lot::Mutex;

use crate::error::{DbError, DbResult};
use crate::repo::SnapshotRepository;

/// Snapshot repository held in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotRepository {
    snapshot: Arc<Mutex<Option<StoreSnapshot>>>,
    saves: Arc<Mutex<u64>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with a snapshot
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        let repo = Self::default();
        *repo.snapshot.lock() = Some(snapshot);
        repo
    }

    /// Last saved snapshot
    pub fn current(&self) -> Option<StoreSnapshot> {
        self.snapshot.lock().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> u64 {
        *self.saves.lock()
    }
}

#[async_trait]
impl SnapshotRepository for MemorySnapshotRepository {
    async fn load(&self) -> DbResult<Option<StoreSnapshot>> {
        Ok(self.current())
    }

    async fn save(&self, snapshot: &StoreSnapshot) -> DbResult<()> {
        *self.snapshot.lock() = Some(snapshot.clone());
        *self.saves.lock() += 1;
        Ok(())
    }

    async fn create(&self, snapshot: &StoreSnapshot) -> DbResult<()> {
        let mut slot = self.snapshot.lock();
        if slot.is_some() {
            return Err(DbError::AlreadyExists("memory".to_string()));
        }
        *slot = Some(snapshot.clone());
        *self.saves.lock() += 1;
        Ok(())
    }
}
