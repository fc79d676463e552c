//! Atomic validation rules
//!
//! Each constructor returns an independent `Validator` for one constraint.

use crate::error::ValidationError;
use crate::users::UserRegistry;
use crate::utils::path;
use crate::validate::Validator;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Rejects answers shorter than `min` bytes.
pub fn min_length(min: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |input| {
        if input.len() < min {
            return Err(ValidationError::new(message.as_str()));
        }
        Ok(())
    })
}

/// Rejects usernames already present in the registry (exact match).
pub fn username_available(registry: UserRegistry) -> Validator {
    Box::new(move |input| {
        if registry.contains_username(input) {
            return Err(ValidationError::new(format!(
                "Username '{}' already exists",
                input
            )));
        }
        Ok(())
    })
}

/// Accepts only an answer byte-for-byte equal to `expected`.
pub fn matches(expected: String, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |input| {
        if input != expected {
            return Err(ValidationError::new(message.as_str()));
        }
        Ok(())
    })
}

/// Accepts paths that resolve to an existing file.
pub fn file_exists() -> Validator {
    Box::new(|input| {
        if !path::file_exists(input) {
            return Err(ValidationError::new("File not found"));
        }
        Ok(())
    })
}

/// Accepts `yes` or `no`, in any case.
pub fn yes_or_no() -> Validator {
    Box::new(|input| {
        if input.eq_ignore_ascii_case("yes") || input.eq_ignore_ascii_case("no") {
            return Ok(());
        }
        Err(ValidationError::new("Please answer yes or no"))
    })
}
