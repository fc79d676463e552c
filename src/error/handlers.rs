//! Error handlers
//!
//! Provides error logging and the rendering shown to a remote user.

use crate::error::types::{CancelReason, ServerError, UserError};
use log::{error, info, warn};

/// Handle a server error
pub fn handle_error(err: &ServerError) {
    error!("Server Error: {}", err);
}

/// Log a failed user workflow at a level matching its cause
pub fn log_user_error(peer: &str, err: &UserError) {
    match err {
        UserError::SessionCancelled(reason) => info!("Session {} cancelled: {}", peer, reason),
        UserError::DuplicateUsername(_)
        | UserError::UserNotFound(_)
        | UserError::RegistryNotEmpty => {
            warn!("Session {}: {}", peer, err)
        }
        _ => error!("Session {}: {}", peer, err),
    }
}

/// Convert a workflow error to the line written back to the session
pub fn error_to_session_line(err: &UserError) -> String {
    match err {
        UserError::SessionCancelled(CancelReason::Interrupted) => "^C\r\n".to_string(),
        UserError::PasswordHash(_) | UserError::Storage(_) => {
            "✗ Internal error, nothing was changed\r\n".to_string()
        }
        _ => format!("✗ {}\r\n", err),
    }
}
