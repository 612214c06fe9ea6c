//! Session state management
//!
//! Holds per-connection transient state and reconciles it back into durable
//! storage at disconnect.

pub mod reconciler;
pub mod state;

pub use reconciler::{ReconcileOutcome, reconcile_disconnect};
pub use state::SessionState;
