//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod encode_key;
pub mod issue_token;
pub mod ping;
pub mod serve;
