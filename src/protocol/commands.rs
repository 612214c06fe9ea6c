//! Module `commands`
//!
//! Defines the text command parsing logic and related data structures used
//! to represent commands, their status, and results.

/// Represents a command parsed from a connection's input line.
///
/// The trailing argument is greedy: everything after the command word
/// belongs to it, so passwords may contain spaces.
#[derive(Debug, PartialEq)]
pub enum Command {
    HELLO(String),    // Display name for this connection
    LOGIN(String),    // Password for an existing account
    REGISTER(String), // Password for a new account
    STATS,
    QUIT,
    UNKNOWN, // Unknown or misused command
}

/// Represents the outcome status of executing a command.
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
    /// Line broadcast to every connection, e.g. a registration announcement.
    pub announcement: Option<String>,
}

/// Parses a raw command line into the `Command` enum.
///
/// The command word is case-insensitive. Commands that require an argument
/// parse to `UNKNOWN` when it is missing.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "HELLO" if !arg.is_empty() => Command::HELLO(arg.to_string()),
        "LOGIN" if !arg.is_empty() => Command::LOGIN(arg.to_string()),
        "REGISTER" if !arg.is_empty() => Command::REGISTER(arg.to_string()),
        "STATS" => Command::STATS,
        "QUIT" | "Q" => Command::QUIT,
        _ => Command::UNKNOWN,
    }
}
