//! Error types
//!
//! Defines domain-specific error types for validation, user workflows and the server.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Field-level rule violation reported by a validator.
///
/// The prompt engine renders it inline and asks again, so it never
/// escapes a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Why a session stopped answering prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user sent an interrupt (Ctrl-C / Ctrl-D) at a prompt.
    Interrupted,
    /// The remote side closed the connection.
    Closed,
    /// No answer arrived within the prompt timeout.
    TimedOut,
    /// An answer line exceeded the configured maximum length.
    LineTooLong,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Interrupted => write!(f, "interrupted"),
            CancelReason::Closed => write!(f, "connection closed"),
            CancelReason::TimedOut => write!(f, "timed out"),
            CancelReason::LineTooLong => write!(f, "line too long"),
        }
    }
}

/// User workflow errors
#[derive(Debug)]
pub enum UserError {
    DuplicateUsername(String),
    UserNotFound(String),
    RegistryNotEmpty,
    FileRead(PathBuf, io::Error),
    SessionCancelled(CancelReason),
    PasswordHash(String),
    Storage(String),
    Io(io::Error),
}

impl UserError {
    /// Returns true when the session can no longer be talked to.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            UserError::SessionCancelled(
                CancelReason::Closed | CancelReason::TimedOut | CancelReason::LineTooLong
            ) | UserError::Io(_)
        )
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::DuplicateUsername(u) => write!(f, "Username '{}' already exists", u),
            UserError::UserNotFound(u) => write!(f, "Username '{}' does not exist", u),
            UserError::RegistryNotEmpty => write!(f, "The first user has already been created"),
            UserError::FileRead(p, e) => write!(f, "Cannot read {}: {}", p.display(), e),
            UserError::SessionCancelled(r) => write!(f, "Session cancelled: {}", r),
            UserError::PasswordHash(s) => write!(f, "Password hashing failed: {}", s),
            UserError::Storage(s) => write!(f, "User storage error: {}", s),
            UserError::Io(e) => write!(f, "Session I/O error: {}", e),
        }
    }
}

impl std::error::Error for UserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UserError::FileRead(_, e) | UserError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for UserError {
    fn from(error: io::Error) -> Self {
        UserError::Io(error)
    }
}

/// General server error that encompasses all error types
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    User(UserError),
    IoError(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::User(e) => write!(f, "User error: {}", e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<UserError> for ServerError {
    fn from(error: UserError) -> Self {
        ServerError::User(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}
