//! HTTP handlers

mod command;
mod health;

pub use command::command;
pub use health::{health, ready};
