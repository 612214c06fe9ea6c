//! Disconnect reconciliation
//!
//! Diffs a session's final attributes against the durable account record and
//! writes back any divergence. Runs exactly once per connection teardown,
//! after the command loop has exited.

use log::warn;

use crate::account::AccountStore;
use crate::error::StoreError;
use crate::session::SessionState;

/// Which fields a reconciliation pass actually wrote.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReconcileOutcome {
    pub progression_written: bool,
    pub rank_written: bool,
    pub admin_rank_written: bool,
}

impl ReconcileOutcome {
    /// True if the pass issued a store write at all.
    pub fn wrote_any(&self) -> bool {
        self.progression_written || self.rank_written || self.admin_rank_written
    }
}

/// Reconciles a finished session back into the account store.
///
/// The comparison baseline is a fresh fetch of the record, not the session's
/// cached copy, so fields another writer changed during the session are not
/// clobbered unless the session itself set them. Attributes the session
/// never loaded or set are skipped entirely. Only diverged fields are
/// written, and an account missing at reconcile time is logged and dropped
/// rather than treated as fatal.
pub fn reconcile_disconnect(
    store: &dyn AccountStore,
    session: &SessionState,
) -> Result<ReconcileOutcome, StoreError> {
    let mut outcome = ReconcileOutcome::default();

    let Some(username) = session.display_name() else {
        // Connection dropped before identifying; nothing to write back.
        return Ok(outcome);
    };

    let Some(mut record) = store.get_account(username)? else {
        warn!(
            "Account {} missing at disconnect; dropping session write-back",
            username
        );
        return Ok(outcome);
    };

    if let Some(score) = session.progression_score() {
        if record.progression_score != score {
            record.progression_score = score;
            outcome.progression_written = true;
        }
    }

    if let Some(rank) = session.rank() {
        if record.rank != rank {
            record.rank = rank.to_string();
            outcome.rank_written = true;
        }
    }

    if let Some(admin_rank) = session.admin_rank() {
        if record.admin_rank != admin_rank {
            record.admin_rank = admin_rank.to_string();
            outcome.admin_rank_written = true;
        }
    }

    if outcome.wrote_any() {
        store.update_account(&record)?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountDefaults, AccountRecord, MemoryAccountStore};

    fn store_with_alice() -> MemoryAccountStore {
        let store = MemoryAccountStore::new();
        store
            .register_account(AccountRecord::new(
                "alice".into(),
                "digest".into(),
                &AccountDefaults::default(),
                75462,
            ))
            .unwrap();
        store
    }

    fn logged_in_session(store: &MemoryAccountStore) -> SessionState {
        let record = store.get_account("alice").unwrap().unwrap();
        let mut session = SessionState::new();
        session.set_display_name("alice".into());
        session.load_account(&record);
        session
    }

    #[test]
    fn unidentified_session_writes_nothing() {
        let store = store_with_alice();

        let outcome = reconcile_disconnect(&store, &SessionState::new()).unwrap();

        assert!(!outcome.wrote_any());
    }

    #[test]
    fn unchanged_session_writes_nothing() {
        let store = store_with_alice();
        let session = logged_in_session(&store);

        let outcome = reconcile_disconnect(&store, &session).unwrap();

        assert!(!outcome.wrote_any());
    }

    #[test]
    fn diverged_score_writes_only_that_field() {
        let store = store_with_alice();
        let mut session = logged_in_session(&store);
        session.set_progression_score(80000);

        let outcome = reconcile_disconnect(&store, &session).unwrap();

        assert!(outcome.progression_written);
        assert!(!outcome.rank_written);
        assert!(!outcome.admin_rank_written);
        let record = store.get_account("alice").unwrap().unwrap();
        assert_eq!(record.progression_score, 80000);
        assert_eq!(record.rank, "Pilot");
    }

    #[test]
    fn attributes_never_loaded_are_not_written() {
        // Session identified and played without logging in: only the score
        // attribute was ever set, so rank fields must stay untouched even
        // though the session has no cached values for them.
        let store = store_with_alice();
        let mut session = SessionState::new();
        session.set_display_name("alice".into());
        session.set_progression_score(90000);

        let outcome = reconcile_disconnect(&store, &session).unwrap();

        assert!(outcome.progression_written);
        assert!(!outcome.rank_written);
        assert!(!outcome.admin_rank_written);
    }

    #[test]
    fn second_pass_with_no_changes_writes_nothing() {
        let store = store_with_alice();
        let mut session = logged_in_session(&store);
        session.set_rank("Captain".into());

        let first = reconcile_disconnect(&store, &session).unwrap();
        let second = reconcile_disconnect(&store, &session).unwrap();

        assert!(first.rank_written);
        assert!(!second.wrote_any());
    }

    #[test]
    fn missing_account_is_dropped_not_fatal() {
        let store = MemoryAccountStore::new();
        let mut session = SessionState::new();
        session.set_display_name("ghost".into());
        session.set_progression_score(1);

        let outcome = reconcile_disconnect(&store, &session).unwrap();

        assert!(!outcome.wrote_any());
    }

    #[test]
    fn concurrent_update_to_absent_attribute_survives() {
        // Session only ever carried a score attribute. Another writer
        // promotes alice mid-session; the rank write-back is skipped because
        // the attribute is absent, so the promotion survives.
        let store = store_with_alice();
        let mut session = SessionState::new();
        session.set_display_name("alice".into());
        session.set_progression_score(80000);

        let mut promoted = store.get_account("alice").unwrap().unwrap();
        promoted.rank = "Captain".to_string();
        store.update_account(&promoted).unwrap();

        let outcome = reconcile_disconnect(&store, &session).unwrap();

        assert!(outcome.progression_written);
        assert!(!outcome.rank_written);
        let record = store.get_account("alice").unwrap().unwrap();
        assert_eq!(record.rank, "Captain");
        assert_eq!(record.progression_score, 80000);
    }
}
