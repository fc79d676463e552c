//! Password change workflow
//!
//! Locates an existing user, then password → confirmation → commit.

use log::info;

use crate::error::UserError;
use crate::session::Session;
use crate::users::UserRegistry;
use crate::workflow::steps::{self, Draft, Step};

/// Prompts for a new password of `username` and stores its hash.
///
/// Fails with `UserNotFound` before prompting if the user does not exist.
/// Only the stored credential changes.
pub async fn change_password(
    username: &str,
    registry: &UserRegistry,
    session: &mut Session,
) -> Result<(), UserError> {
    info!("Change password of user '{}' from {}", username, session.peer());

    if registry.find_by_username(username).is_none() {
        return Err(UserError::UserNotFound(username.to_string()));
    }

    let mut draft = Draft::default();
    let mut step = Step::EnterPassword;
    while step != Step::Commit {
        steps::run_step(step, &mut draft, session, registry).await?;
        step = step.next_in_password_change();
    }

    let password_hash = steps::hash_password(std::mem::take(&mut draft.password)).await?;
    let target = username.to_string();
    steps::commit(registry, move |registry| {
        registry.update_password(&target, password_hash)
    })
    .await?;

    info!("Password of user '{}' changed", username);
    Ok(())
}
