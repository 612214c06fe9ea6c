//! Authentication system
//!
//! Handles credential derivation and verification, login, registration, and
//! stats queries.

pub mod controller;
pub mod credentials;
pub mod results;

pub use controller::{identify, login, register, stats};
pub use credentials::CredentialParams;
pub use results::{LoginOutcome, RegisterOutcome, StatsSnapshot};
