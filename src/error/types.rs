//! Error types
//!
//! Defines domain-specific error types for each module of the session host.

use std::fmt;
use std::io;

/// Credential codec errors
///
/// A malformed digest is data corruption in the account store, not a failed
/// verification; callers must be able to tell the two apart.
#[derive(Debug)]
pub enum CredentialError {
    Malformed(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Malformed(detail) => {
                write!(f, "Malformed credential digest: {}", detail)
            }
        }
    }
}

impl std::error::Error for CredentialError {}

/// Account store errors
#[derive(Debug)]
pub enum StoreError {
    DuplicateAccount(String),
    UnknownAccount(String),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateAccount(u) => write!(f, "Account already exists: {}", u),
            StoreError::UnknownAccount(u) => write!(f, "No such account: {}", u),
            StoreError::Unavailable(detail) => write!(f, "Account store unavailable: {}", detail),
        }
    }
}

impl std::error::Error for StoreError {}

/// Authentication module errors
#[derive(Debug)]
pub enum AuthError {
    AccountNotFound(String),
    InvalidCredentials(String),
    AlreadyRegistered(String),
    AlreadyLoggedIn(String),
    NotIdentified,
    NotLoggedIn,
    MalformedInput(String),
    MalformedCredential(String),
    Store(StoreError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::AccountNotFound(u) => write!(f, "Account not found: {}", u),
            AuthError::InvalidCredentials(u) => write!(f, "Invalid credentials for account: {}", u),
            AuthError::AlreadyRegistered(u) => write!(f, "Account already registered: {}", u),
            AuthError::AlreadyLoggedIn(u) => write!(f, "Already logged in as: {}", u),
            AuthError::NotIdentified => write!(f, "Connection has not identified itself"),
            AuthError::NotLoggedIn => write!(f, "User not logged in"),
            AuthError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
            AuthError::MalformedCredential(s) => write!(f, "Malformed stored credential: {}", s),
            AuthError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<CredentialError> for AuthError {
    fn from(error: CredentialError) -> Self {
        match error {
            CredentialError::Malformed(detail) => AuthError::MalformedCredential(detail),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        AuthError::Store(error)
    }
}

/// General session host error that encompasses all error types
#[derive(Debug)]
pub enum ServerError {
    Auth(AuthError),
    Store(StoreError),
    Credential(CredentialError),
    IoError(io::Error),
    ConfigError(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Auth(e) => write!(f, "Authentication error: {}", e),
            ServerError::Store(e) => write!(f, "Account store error: {}", e),
            ServerError::Credential(e) => write!(f, "Credential error: {}", e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
            ServerError::ConfigError(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<AuthError> for ServerError {
    fn from(error: AuthError) -> Self {
        ServerError::Auth(error)
    }
}

impl From<StoreError> for ServerError {
    fn from(error: StoreError) -> Self {
        ServerError::Store(error)
    }
}

impl From<CredentialError> for ServerError {
    fn from(error: CredentialError) -> Self {
        ServerError::Credential(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}
