//! Latchkey Client - SDK for service consumers
//!
//! HTTP client for the Latchkey command API. Relying parties hold an
//! administrator session and use [`AuthClient::verify_token`] to check the
//! session tokens their own users present.

pub mod auth;
pub mod config;
pub mod error;

pub use auth::AuthClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, PERSISTENCE_ERROR};
pub use latchkey_types::{Credentials, Identity, InviteCode, SessionToken};
