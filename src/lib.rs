//! Skyhost session server
//!
//! A multiplayer session host with persistent pilot accounts: salted
//! iterated credential digests, per-connection session state, and
//! disconnect-time reconciliation of earned progression back into the
//! account store.

pub mod account;
pub mod auth;
pub mod client;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod server;
pub mod session;

pub use server::Server;
