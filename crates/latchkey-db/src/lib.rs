//! Latchkey DB - snapshot persistence
//!
//! Durable storage for the authorization state.
//!
//! # Example
//!
//! ```rust,ignore
//! use latchkey_db::{FileSnapshotRepository, SnapshotRepository};
//!
//! let repo = FileSnapshotRepository::new("/var/lib/latchkey/auth.json");
//! let snapshot = repo.load().await?.unwrap_or_default();
//! repo.save(&snapshot).await?;
//! ```

pub mod error;
pub mod file;
pub mod memory;
pub mod repo;

pub use error::{DbError, DbResult};
pub use file::FileSnapshotRepository;
pub use memory::MemorySnapshotRepository;
pub use repo::*;
