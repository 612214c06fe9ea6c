//! Authentication controller
//!
//! Implements the login, registration, and stats operations, orchestrating
//! the credential codec, the account store, and the connection's session
//! state. Verification failures never alter durable state; key derivation
//! runs before any store call so no shared lock spans it.

use log::{error, info};

use crate::account::{AccountDefaults, AccountRecord, AccountStore};
use crate::auth::credentials::{self, CredentialParams};
use crate::auth::results::{LoginOutcome, RegisterOutcome, StatsSnapshot};
use crate::error::{AuthError, StoreError};
use crate::session::SessionState;

/// Rejects empty or overlong input and control characters.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty() && input.len() <= max_length && !input.contains(['\r', '\n', '\0'])
}

/// Sets the connection's display name after validating it.
///
/// The name is set once; the host delivers it at connect and it stays fixed
/// for the life of the connection.
pub fn identify(
    session: &mut SessionState,
    name: &str,
    max_length: usize,
) -> Result<(), AuthError> {
    if session.display_name().is_some() {
        return Err(AuthError::MalformedInput(
            "display name already set".into(),
        ));
    }

    if name.contains(':') || name.starts_with(char::is_numeric) {
        return Err(AuthError::MalformedInput("invalid display name".into()));
    }

    if !is_valid_input(name, max_length) {
        return Err(AuthError::MalformedInput("invalid display name".into()));
    }

    session.set_display_name(name.to_string());
    Ok(())
}

/// Authenticates the connection against its display name's account.
///
/// On success the session is marked logged in and its cached attributes are
/// populated from the record. On any failure the session is untouched.
pub fn login(
    store: &dyn AccountStore,
    session: &mut SessionState,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    let username = session
        .display_name()
        .ok_or(AuthError::NotIdentified)?
        .to_string();

    if session.is_logged_in() {
        return Err(AuthError::AlreadyLoggedIn(username));
    }

    let record = store
        .get_account(&username)?
        .ok_or_else(|| AuthError::AccountNotFound(username.clone()))?;

    match credentials::verify(&record.credential_digest, password) {
        Ok(true) => {
            session.load_account(&record);
            info!("User {} logged in", username);
            Ok(LoginOutcome { username })
        }
        Ok(false) => Err(AuthError::InvalidCredentials(username)),
        Err(e) => {
            // Corrupt stored record, not a user mistake.
            error!("Stored credential for {} is corrupt: {}", username, e);
            Err(e.into())
        }
    }
}

/// Creates an account for the connection's display name.
///
/// The starting progression score is taken from the session's cached value
/// when pre-registration play already earned one, otherwise from the
/// configured default. A registration race is settled by the store's atomic
/// insert; the loser sees `AlreadyRegistered`.
pub fn register(
    store: &dyn AccountStore,
    session: &SessionState,
    password: &str,
    params: &CredentialParams,
    defaults: &AccountDefaults,
    max_password_length: usize,
) -> Result<RegisterOutcome, AuthError> {
    let username = session
        .display_name()
        .ok_or(AuthError::NotIdentified)?
        .to_string();

    if !is_valid_input(password, max_password_length) {
        return Err(AuthError::MalformedInput("invalid password".into()));
    }

    if store.get_account(&username)?.is_some() {
        return Err(AuthError::AlreadyRegistered(username));
    }

    let digest = credentials::derive(password, params);
    let starting_score = session
        .progression_score()
        .unwrap_or(defaults.starting_score);
    let record = AccountRecord::new(username.clone(), digest, defaults, starting_score);

    match store.register_account(record) {
        Ok(record) => {
            info!("{} has just registered", username);
            Ok(RegisterOutcome {
                username,
                starting_score: record.progression_score,
            })
        }
        Err(StoreError::DuplicateAccount(_)) => Err(AuthError::AlreadyRegistered(username)),
        Err(e) => Err(e.into()),
    }
}

/// Returns a read-only stats snapshot for a logged-in connection.
///
/// Reads the durable record, not the session cache; divergence earned during
/// the session becomes visible here only after reconciliation.
pub fn stats(
    store: &dyn AccountStore,
    session: &SessionState,
    admin_sentinel: &str,
) -> Result<StatsSnapshot, AuthError> {
    let username = session.display_name().ok_or(AuthError::NotIdentified)?;

    if !session.is_logged_in() {
        return Err(AuthError::NotLoggedIn);
    }

    let record = store
        .get_account(username)?
        .ok_or_else(|| AuthError::AccountNotFound(username.to_string()))?;

    let admin_rank = if record.admin_rank == admin_sentinel {
        None
    } else {
        Some(record.admin_rank.clone())
    };

    Ok(StatsSnapshot {
        username: record.username,
        progression_score: record.progression_score,
        rank: record.rank,
        admin_rank,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MemoryAccountStore;

    const MAX_NAME: usize = 32;
    const MAX_PASSWORD: usize = 128;

    fn fast_params() -> CredentialParams {
        CredentialParams {
            iterations: 1_000,
            ..CredentialParams::default()
        }
    }

    fn identified_session(name: &str) -> SessionState {
        let mut session = SessionState::new();
        identify(&mut session, name, MAX_NAME).unwrap();
        session
    }

    fn registered_store(name: &str, password: &str) -> MemoryAccountStore {
        let store = MemoryAccountStore::new();
        let session = identified_session(name);
        register(
            &store,
            &session,
            password,
            &fast_params(),
            &AccountDefaults::default(),
            MAX_PASSWORD,
        )
        .unwrap();
        store
    }

    #[test]
    fn identify_rejects_second_name() {
        let mut session = identified_session("alice");

        let result = identify(&mut session, "mallory", MAX_NAME);

        assert!(matches!(result, Err(AuthError::MalformedInput(_))));
        assert_eq!(session.display_name(), Some("alice"));
    }

    #[test]
    fn identify_rejects_garbage_names() {
        for name in ["", "   ", "a:b", "9lives", "line\nbreak"] {
            let mut session = SessionState::new();
            assert!(
                identify(&mut session, name, MAX_NAME).is_err(),
                "expected rejection for {:?}",
                name
            );
        }
    }

    #[test]
    fn login_without_identification_fails() {
        let store = MemoryAccountStore::new();
        let mut session = SessionState::new();

        let result = login(&store, &mut session, "p1");

        assert!(matches!(result, Err(AuthError::NotIdentified)));
    }

    #[test]
    fn login_unknown_account_reports_not_found() {
        let store = MemoryAccountStore::new();
        let mut session = identified_session("alice");

        let result = login(&store, &mut session, "p1");

        assert!(matches!(result, Err(AuthError::AccountNotFound(u)) if u == "alice"));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn login_wrong_password_leaves_session_untouched() {
        let store = registered_store("alice", "p1");
        let mut session = identified_session("alice");

        let result = login(&store, &mut session, "wrong");

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
        assert!(!session.is_logged_in());
        assert!(session.progression_score().is_none());
    }

    #[test]
    fn login_success_populates_session() {
        let store = registered_store("alice", "p1");
        let mut session = identified_session("alice");

        let outcome = login(&store, &mut session, "p1").unwrap();

        assert_eq!(outcome.username, "alice");
        assert!(session.is_logged_in());
        assert_eq!(session.progression_score(), Some(75462));
        assert_eq!(session.rank(), Some("Pilot"));
    }

    #[test]
    fn relogin_is_rejected() {
        let store = registered_store("alice", "p1");
        let mut session = identified_session("alice");
        login(&store, &mut session, "p1").unwrap();
        session.set_progression_score(80000);

        let result = login(&store, &mut session, "p1");

        // The session's live progression must not be clobbered by a reload.
        assert!(matches!(result, Err(AuthError::AlreadyLoggedIn(_))));
        assert_eq!(session.progression_score(), Some(80000));
    }

    #[test]
    fn login_corrupt_digest_is_malformed_credential() {
        let store = MemoryAccountStore::new();
        store
            .register_account(AccountRecord::new(
                "alice".into(),
                "not-a-digest".into(),
                &AccountDefaults::default(),
                75462,
            ))
            .unwrap();
        let mut session = identified_session("alice");

        let result = login(&store, &mut session, "p1");

        assert!(matches!(result, Err(AuthError::MalformedCredential(_))));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn register_twice_reports_already_registered() {
        let store = registered_store("alice", "p1");
        let session = identified_session("alice");

        let result = register(
            &store,
            &session,
            "p2",
            &fast_params(),
            &AccountDefaults::default(),
            MAX_PASSWORD,
        );

        assert!(matches!(result, Err(AuthError::AlreadyRegistered(u)) if u == "alice"));
        assert_eq!(store.account_count(), 1);
    }

    #[test]
    fn register_carries_over_cached_progression() {
        let store = MemoryAccountStore::new();
        let mut session = identified_session("alice");
        session.set_progression_score(120);

        let outcome = register(
            &store,
            &session,
            "p1",
            &fast_params(),
            &AccountDefaults::default(),
            MAX_PASSWORD,
        )
        .unwrap();

        assert_eq!(outcome.starting_score, 120);
        let record = store.get_account("alice").unwrap().unwrap();
        assert_eq!(record.progression_score, 120);
    }

    #[test]
    fn register_rejects_empty_password() {
        let store = MemoryAccountStore::new();
        let session = identified_session("alice");

        let result = register(
            &store,
            &session,
            "  ",
            &fast_params(),
            &AccountDefaults::default(),
            MAX_PASSWORD,
        );

        assert!(matches!(result, Err(AuthError::MalformedInput(_))));
        assert_eq!(store.account_count(), 0);
    }

    #[test]
    fn stats_requires_login() {
        let store = registered_store("alice", "p1");
        let session = identified_session("alice");

        let result = stats(&store, &session, "User");

        assert!(matches!(result, Err(AuthError::NotLoggedIn)));
    }

    #[test]
    fn stats_hides_sentinel_admin_rank() {
        let store = registered_store("alice", "p1");
        let mut session = identified_session("alice");
        login(&store, &mut session, "p1").unwrap();

        let snapshot = stats(&store, &session, "User").unwrap();

        assert_eq!(snapshot.username, "alice");
        assert_eq!(snapshot.rank, "Pilot");
        assert_eq!(snapshot.progression_score, 75462);
        assert!(snapshot.admin_rank.is_none());
    }

    #[test]
    fn stats_shows_elevated_admin_rank() {
        let store = registered_store("alice", "p1");
        let mut record = store.get_account("alice").unwrap().unwrap();
        record.admin_rank = "Moderator".to_string();
        store.update_account(&record).unwrap();

        let mut session = identified_session("alice");
        login(&store, &mut session, "p1").unwrap();

        let snapshot = stats(&store, &session, "User").unwrap();

        assert_eq!(snapshot.admin_rank.as_deref(), Some("Moderator"));
    }
}
