//! User creation workflow
//!
//! Username → password → confirmation → public key → (admin flag) → commit.

use log::info;

use crate::error::UserError;
use crate::session::Session;
use crate::users::{NewUser, User, UserRegistry};
use crate::workflow::steps::{self, Draft, Step};

/// Caller choices that shape the creation workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateUserOptions {
    /// Offer the yes/no admin question
    pub show_admin_choice: bool,
    /// Admin flag used when the question is not asked
    pub default_is_admin: bool,
    /// Commit only into an empty registry
    pub first_user: bool,
}

impl CreateUserOptions {
    /// The admin question is only worth asking when the answer can change the result.
    pub fn asks_admin(&self) -> bool {
        self.show_admin_choice && !self.default_is_admin
    }
}

/// Collects a new user over `session` and inserts it into `registry`.
///
/// Returns the generated registry key and the stored record. Any error,
/// including a cancelled session, leaves the registry untouched.
pub async fn create_user(
    show_admin_choice: bool,
    default_is_admin: bool,
    registry: &UserRegistry,
    session: &mut Session,
) -> Result<(String, User), UserError> {
    let options = CreateUserOptions {
        show_admin_choice,
        default_is_admin,
        first_user: false,
    };
    create_user_with(options, registry, session).await
}

/// Creates the admin of an empty registry.
///
/// Fails with `RegistryNotEmpty` at commit if another session got there first.
pub async fn create_first_admin(
    registry: &UserRegistry,
    session: &mut Session,
) -> Result<(String, User), UserError> {
    let options = CreateUserOptions {
        show_admin_choice: false,
        default_is_admin: true,
        first_user: true,
    };
    create_user_with(options, registry, session).await
}

async fn create_user_with(
    options: CreateUserOptions,
    registry: &UserRegistry,
    session: &mut Session,
) -> Result<(String, User), UserError> {
    info!("Create a user from {}", session.peer());

    let mut draft = Draft {
        is_admin: options.default_is_admin,
        ..Draft::default()
    };

    let mut step = Step::EnterUsername;
    while step != Step::Commit {
        steps::run_step(step, &mut draft, session, registry).await?;
        step = step.next_in_creation(&options);
    }

    let password_hash = steps::hash_password(std::mem::take(&mut draft.password)).await?;

    if draft.is_admin {
        info!("Create an admin user");
    }

    let new_user = NewUser {
        username: draft.username,
        password_hash,
        is_admin: draft.is_admin,
        public_key: draft.public_key,
    };
    let (key, user) = steps::commit(registry, move |registry| {
        if options.first_user {
            registry.insert_first(new_user)
        } else {
            registry.insert(new_user)
        }
    })
    .await?;

    info!("User '{}' created with key {}", user.username, key);
    Ok((key, user))
}
