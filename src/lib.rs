//! RAX Gate - user console of a jump host
//!
//! Remote sessions create users, change passwords and browse the user list
//! through validated prompts over a plain TCP line channel.

pub mod config;
pub mod error;
pub mod menu;
pub mod server;
pub mod session;
pub mod users;
pub mod utils;
pub mod validate;
pub mod workflow;

#[cfg(test)]
mod test_utils;

pub use server::Server;
