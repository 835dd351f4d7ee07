//! Application state

use std::sync::Arc;

use latchkey_auth_core::{Argon2Hasher, AuthStore, OsTokenSource};
use latchkey_db::SnapshotRepository;
use tokio::sync::Mutex;

use crate::config::Config;

/// Type alias for the store with production collaborators
pub type AuthStoreImpl = AuthStore<Argon2Hasher, OsTokenSource>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Authorization store
    pub store: Arc<AuthStoreImpl>,
    /// Where snapshots are written after each mutation
    pub snapshots: Arc<dyn SnapshotRepository>,
    /// Held from the start of a mutation until its snapshot is durable
    pub(crate) persist_gate: Arc<Mutex<()>>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: AuthStoreImpl,
        snapshots: Arc<dyn SnapshotRepository>,
        config: Config,
    ) -> Self {
        Self {
            store: Arc::new(store),
            snapshots,
            persist_gate: Arc::new(Mutex::new(())),
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
