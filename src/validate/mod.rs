//! Input validation
//!
//! Validators are plain functions from a candidate string to `Ok(())` or a
//! `ValidationError`, combined with `multi_validate`.

pub mod chain;
pub mod rules;

pub use chain::{Validator, multi_validate};
pub use rules::{
    MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, file_exists, matches, min_length, username_available,
    yes_or_no,
};
