//! Remote session I/O
//!
//! Binds one remote connection's byte streams and provides the prompt
//! primitive every workflow step goes through.

pub mod io;
pub mod prompt;

pub use io::Session;
pub use prompt::Prompt;
