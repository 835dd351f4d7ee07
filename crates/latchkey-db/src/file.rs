//! File-backed snapshot repository
//!
//! Snapshots are written as pretty JSON through a temp file in the same
//! directory, fsynced, then renamed over the target. A reader therefore sees
//! either the previous snapshot or the new one, never a torn write. The temp
//! file is created with mode 0600 and keeps it across the rename, since the
//! document holds password hashes and live session tokens.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use latchkey_types::StoreSnapshot;
use tempfile::NamedTempFile;

use crate::error::{DbError, DbResult};
use crate::repo::SnapshotRepository;

/// JSON document on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    path: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a repository for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot document
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, snapshot: &StoreSnapshot, overwrite: bool) -> DbResult<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes, overwrite))
            .await
            .map_err(|e| DbError::Task(e.to_string()))??;

        tracing::debug!(
            path = %self.path.display(),
            users = snapshot.user_count(),
            "Snapshot written"
        );
        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for FileSnapshotRepository {
    async fn load(&self) -> DbResult<Option<StoreSnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)?;

        tracing::info!(
            path = %self.path.display(),
            users = snapshot.user_count(),
            outstanding_invites = snapshot.invite_codes.len(),
            "Snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &StoreSnapshot) -> DbResult<()> {
        self.write(snapshot, true).await
    }

    async fn create(&self, snapshot: &StoreSnapshot) -> DbResult<()> {
        self.write(snapshot, false).await
    }
}

fn write_atomic(path: &Path, bytes: &[u8], overwrite: bool) -> DbResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if overwrite {
        tmp.persist(path).map_err(|e| e.error)?;
    } else {
        tmp.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                DbError::AlreadyExists(path.display().to_string())
            } else {
                DbError::Io(e.error)
            }
        })?;
    }

    sync_dir(parent);
    Ok(())
}

/// Best-effort fsync of the directory so the rename itself is durable
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    if let Err(e) = std::fs::File::open(dir).and_then(|d| d.sync_all()) {
        tracing::debug!(path = %dir.display(), "Directory sync failed: {}", e);
    }
    #[cfg(not(unix))]
    let _ = dir;
}
