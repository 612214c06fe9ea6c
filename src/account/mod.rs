//! Account persistence
//!
//! Defines the durable account model and the store contract it lives behind.

pub mod record;
pub mod store;

pub use record::{AccountDefaults, AccountRecord};
pub use store::{AccountStore, MemoryAccountStore, SharedAccountStore};
