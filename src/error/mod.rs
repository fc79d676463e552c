//! Error handling
//!
//! Defines error types and handling for the user console.

pub mod handlers;
pub mod types;

pub use types::*;
