//! Server core functionality
//!
//! This module contains the TCP listener that accepts remote sessions and
//! the console each session is handed to.

pub mod console;
pub mod core;

pub use self::console::run_console;
pub use self::core::Server;
