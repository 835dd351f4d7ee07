//! Latchkey Types - Shared domain types
//!
//! This crate contains types used across Latchkey crates:
//! - Identities, session tokens and invite codes
//! - The persisted authorization state
//! - Wire request DTOs and the command table

pub mod api;
pub mod command;
pub mod identity;
pub mod snapshot;

pub use api::*;
pub use command::*;
pub use identity::*;
pub use snapshot::*;
