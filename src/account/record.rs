//! Module `record`
//!
//! Defines the persisted account shape and the defaults applied at creation.

use serde::Deserialize;

/// A persisted user account.
///
/// `username` is the primary key of the store and is immutable after
/// creation. `credential_digest` is produced by the credential codec and is
/// never decoded by any other component.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub username: String,
    pub credential_digest: String,
    pub rank: String,
    pub admin_rank: String,
    pub progression_score: u32,
}

impl AccountRecord {
    /// Builds a fresh record for a newly registered account.
    pub fn new(
        username: String,
        credential_digest: String,
        defaults: &AccountDefaults,
        starting_score: u32,
    ) -> Self {
        Self {
            username,
            credential_digest,
            rank: defaults.rank.clone(),
            admin_rank: defaults.admin_rank.clone(),
            progression_score: starting_score,
        }
    }
}

/// Field values applied to every newly created account.
///
/// `admin_rank` doubles as the sentinel meaning "no elevated privilege";
/// accounts carrying it are not shown an admin rank in stats output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountDefaults {
    pub rank: String,
    pub admin_rank: String,
    pub starting_score: u32,
}

impl Default for AccountDefaults {
    fn default() -> Self {
        Self {
            rank: "Pilot".to_string(),
            admin_rank: "User".to_string(),
            starting_score: 75462,
        }
    }
}
