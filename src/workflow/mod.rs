//! User workflows
//!
//! Ordered prompt sequences that create a user or change a password. A
//! workflow moves strictly forward through its `Step`s; the first error
//! aborts it, and only the final `Commit` touches the registry.

pub mod create;
pub mod password;
pub mod steps;

pub use create::{CreateUserOptions, create_first_admin, create_user};
pub use password::change_password;
pub use steps::Step;
