//! User registry
//!
//! Holds the user records of the jump host and the credential helpers used to store them.

pub mod crypto;
pub mod model;
pub mod registry;

pub use model::{NewUser, User};
pub use registry::UserRegistry;
