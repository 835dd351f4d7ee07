//! Latchkey Auth Core - credential and session authority
//!
//! The [`AuthStore`] state machine plus the two collaborators it depends on:
//! a one-way [`PasswordHasher`] and a random [`TokenSource`].

pub mod config;
pub mod error;
pub mod password;
pub mod store;
pub mod token;

pub use config::*;
pub use error::*;
pub use password::*;
pub use store::*;
pub use token::*;
