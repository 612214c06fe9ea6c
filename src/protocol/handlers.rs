//! Command handlers
//!
//! Dispatches parsed commands to the authentication controller and maps the
//! outcome onto user-facing responses. Internal error detail never reaches
//! the user; notably, a missing account and a wrong password render as the
//! same rejection.

use log::error;

use crate::account::AccountStore;
use crate::auth;
use crate::error::{AuthError, StoreError};
use crate::middleware::LoginThrottle;
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::protocol::responses;
use crate::server::ServerConfig;
use crate::session::SessionState;

/// Dispatches a received command to its corresponding handler.
pub fn handle_command(
    session: &mut SessionState,
    command: &Command,
    store: &dyn AccountStore,
    config: &ServerConfig,
    throttle: &mut LoginThrottle,
) -> CommandResult {
    match command {
        Command::HELLO(name) => handle_cmd_hello(session, name, config),
        Command::LOGIN(password) => handle_cmd_login(session, password, store, throttle),
        Command::REGISTER(password) => handle_cmd_register(session, password, store, config),
        Command::STATS => handle_cmd_stats(session, store, config),
        Command::QUIT => handle_cmd_quit(),
        Command::UNKNOWN => handle_cmd_unknown(),
    }
}

fn success(message: &str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(message.to_string()),
        announcement: None,
    }
}

fn failure(reason: &AuthError, message: &str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(reason.to_string()),
        message: Some(message.to_string()),
        announcement: None,
    }
}

/// Maps an auth failure onto the user-visible rejection text.
fn rejection_text(error: &AuthError) -> &'static str {
    match error {
        // Unified on purpose: do not reveal whether the account exists.
        AuthError::AccountNotFound(_)
        | AuthError::InvalidCredentials(_)
        | AuthError::MalformedCredential(_) => responses::LOGIN_REJECTED,
        AuthError::AlreadyLoggedIn(_) => responses::ALREADY_LOGGED_IN,
        AuthError::AlreadyRegistered(_) => responses::ALREADY_REGISTERED,
        AuthError::NotIdentified => responses::NOT_IDENTIFIED,
        AuthError::NotLoggedIn => responses::NOT_LOGGED_IN,
        AuthError::MalformedInput(_) => responses::INVALID_NAME,
        AuthError::Store(_) => responses::SERVICE_UNAVAILABLE,
    }
}

fn handle_cmd_hello(session: &mut SessionState, name: &str, config: &ServerConfig) -> CommandResult {
    match auth::identify(session, name, config.max_display_name_length) {
        Ok(()) => CommandResult {
            status: CommandStatus::Success,
            message: Some(responses::identified(name)),
            announcement: None,
        },
        Err(e) => failure(&e, rejection_text(&e)),
    }
}

fn handle_cmd_login(
    session: &mut SessionState,
    password: &str,
    store: &dyn AccountStore,
    throttle: &mut LoginThrottle,
) -> CommandResult {
    if !throttle.check() {
        return CommandResult {
            status: CommandStatus::Failure("login throttled".to_string()),
            message: Some(responses::TOO_MANY_ATTEMPTS.to_string()),
            announcement: None,
        };
    }

    match auth::login(store, session, password) {
        Ok(_) => success(responses::LOGIN_SUCCESS),
        Err(e) => {
            if matches!(
                e,
                AuthError::AccountNotFound(_) | AuthError::InvalidCredentials(_)
            ) {
                throttle.record_failure();
            }
            report_store_failure(&e);
            failure(&e, rejection_text(&e))
        }
    }
}

fn handle_cmd_register(
    session: &mut SessionState,
    password: &str,
    store: &dyn AccountStore,
    config: &ServerConfig,
) -> CommandResult {
    let result = auth::register(
        store,
        session,
        password,
        &config.credentials,
        &config.account_defaults,
        config.max_password_length,
    );

    match result {
        Ok(outcome) => CommandResult {
            status: CommandStatus::Success,
            message: Some(responses::REGISTER_SUCCESS.to_string()),
            announcement: Some(responses::registration_announcement(&outcome.username)),
        },
        Err(e) => {
            report_store_failure(&e);
            let text = if matches!(e, AuthError::MalformedInput(_)) {
                responses::INVALID_PASSWORD
            } else {
                rejection_text(&e)
            };
            failure(&e, text)
        }
    }
}

fn handle_cmd_stats(
    session: &SessionState,
    store: &dyn AccountStore,
    config: &ServerConfig,
) -> CommandResult {
    match auth::stats(store, session, &config.account_defaults.admin_rank) {
        Ok(snapshot) => CommandResult {
            status: CommandStatus::Success,
            message: Some(responses::stats_report(&snapshot)),
            announcement: None,
        },
        Err(e) => {
            report_store_failure(&e);
            failure(&e, rejection_text(&e))
        }
    }
}

fn handle_cmd_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(responses::GOODBYE.to_string()),
        announcement: None,
    }
}

fn handle_cmd_unknown() -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure("unknown command".to_string()),
        message: Some(responses::UNKNOWN_COMMAND.to_string()),
        announcement: None,
    }
}

/// Store outages are infrastructure failures; the user sees a generic
/// message, the operator log gets the detail.
fn report_store_failure(error: &AuthError) {
    if let AuthError::Store(StoreError::Unavailable(detail)) = error {
        error!("Account store unavailable: {}", detail);
    }
}
