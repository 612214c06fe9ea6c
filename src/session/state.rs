//! Module `session::state`
//!
//! Defines the `SessionState` struct holding a connection's transient
//! attributes: identification, login status, and cached progression fields.
//!
//! The state is owned by the connection's handler task and discarded after
//! disconnect reconciliation. It is a cache of a subset of the durable
//! account record, not a source of truth; the two are allowed to diverge
//! during a session and are forced back into agreement only by the
//! reconciler. Progression fields are `Option` so "never loaded" stays
//! distinguishable from any loaded value.

use crate::account::AccountRecord;

/// Per-connection transient state.
#[derive(Debug, Default)]
pub struct SessionState {
    display_name: Option<String>,
    logged_in: bool,
    progression_score: Option<u32>,
    rank: Option<String>,
    admin_rank: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Returns the display name set at identification, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns whether the connection has passed credential verification.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Returns the cached progression score, absent until loaded or set.
    pub fn progression_score(&self) -> Option<u32> {
        self.progression_score
    }

    /// Returns the cached rank, absent until loaded or set.
    pub fn rank(&self) -> Option<&str> {
        self.rank.as_deref()
    }

    /// Returns the cached admin rank, absent until loaded or set.
    pub fn admin_rank(&self) -> Option<&str> {
        self.admin_rank.as_deref()
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Sets the display name. Set once at identification; immutable after.
    pub fn set_display_name(&mut self, name: String) {
        self.display_name = Some(name);
    }

    /// Populates the cached fields from an account record and marks the
    /// session logged in. The only path that sets the logged-in flag.
    pub fn load_account(&mut self, record: &AccountRecord) {
        self.progression_score = Some(record.progression_score);
        self.rank = Some(record.rank.clone());
        self.admin_rank = Some(record.admin_rank.clone());
        self.logged_in = true;
    }

    /// Sets the progression score attribute. Gameplay-facing.
    pub fn set_progression_score(&mut self, score: u32) {
        self.progression_score = Some(score);
    }

    /// Sets the rank attribute. Gameplay-facing.
    pub fn set_rank(&mut self, rank: String) {
        self.rank = Some(rank);
    }

    /// Sets the admin rank attribute. Gameplay-facing.
    pub fn set_admin_rank(&mut self, admin_rank: String) {
        self.admin_rank = Some(admin_rank);
    }
}
