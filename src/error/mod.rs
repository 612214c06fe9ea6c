//! Error handling
//!
//! Defines error types and handling for the session host.

pub mod types;

pub use types::*;
