//! Response text
//!
//! User-facing message strings. Login rejections share one string whether
//! the account is missing or the password is wrong, so the command surface
//! does not leak which names have accounts.

use crate::auth::StatsSnapshot;

pub const GREETING: &str = "Welcome aboard! Identify yourself with HELLO <callsign>.";
pub const SERVER_FULL: &str = "Server is full. Try again later.";
pub const COMMAND_TOO_LONG: &str = "Command too long.";
pub const UNKNOWN_COMMAND: &str = "Unknown command.";
pub const GOODBYE: &str = "Goodbye!";

pub const NOT_IDENTIFIED: &str = "Identify yourself first with HELLO <callsign>.";
pub const INVALID_NAME: &str = "That callsign cannot be used.";

pub const LOGIN_SUCCESS: &str = "You're now logged in!";
pub const LOGIN_REJECTED: &str = "Incorrect credentials entered!";
pub const ALREADY_LOGGED_IN: &str = "You are already logged in!";
pub const TOO_MANY_ATTEMPTS: &str = "Too many failed attempts. Try again later.";

pub const REGISTER_SUCCESS: &str = "You're now registered!";
pub const ALREADY_REGISTERED: &str = "You have already registered an account!";
pub const INVALID_PASSWORD: &str = "That password cannot be used.";

pub const NOT_LOGGED_IN: &str = "You must be logged in to view stats!";
pub const SERVICE_UNAVAILABLE: &str = "Service temporarily unavailable. Try again later.";

/// Greeting for a freshly identified connection.
pub fn identified(name: &str) -> String {
    format!("Welcome, {}! LOGIN or REGISTER with your password.", name)
}

/// Public announcement emitted when an account is created.
pub fn registration_announcement(name: &str) -> String {
    format!("{} has registered an account!", name)
}

/// Multi-line stats report for the requesting user.
pub fn stats_report(snapshot: &StatsSnapshot) -> String {
    let mut lines = vec![
        format!("Stats for {}:", snapshot.username),
        format!("Flying hours: {}", snapshot.progression_score),
        format!("Rank: {}", snapshot.rank),
    ];

    if let Some(admin_rank) = &snapshot.admin_rank {
        lines.push(format!("Admin rank: {}", admin_rank));
    }

    lines.join("\r\n")
}
