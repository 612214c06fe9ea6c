//! Middleware
//!
//! Connection logging and login throttling.

pub mod logging;
pub mod rate_limit;

pub use rate_limit::LoginThrottle;
