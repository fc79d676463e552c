//! Utility functions
//!
//! Provides logging setup and filesystem path helpers.

pub mod logging;
pub mod path;
