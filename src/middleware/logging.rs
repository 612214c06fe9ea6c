//! Logging middleware
//!
//! Operator-facing connection and command logging.

use std::net::SocketAddr;

use log::info;

use crate::protocol::Command;

/// Log a new connection.
pub fn log_connection(addr: &SocketAddr) {
    info!("Connection established: {}", addr);
}

/// Log a dispatched command. Passwords are redacted.
pub fn log_command(addr: &SocketAddr, command: &Command) {
    match command {
        Command::HELLO(name) => info!("{} identified as {}", addr, name),
        Command::LOGIN(_) => info!("{} issued LOGIN", addr),
        Command::REGISTER(_) => info!("{} issued REGISTER", addr),
        Command::STATS => info!("{} issued STATS", addr),
        Command::QUIT => info!("{} issued QUIT", addr),
        Command::UNKNOWN => info!("{} issued an unknown command", addr),
    }
}

/// Log a finished connection with its teardown reason.
pub fn log_disconnect(addr: &SocketAddr, reason: &str) {
    info!("Connection terminated: {} ({})", addr, reason);
}
