//! Workflow steps
//!
//! Each `Step` names the prompt it runs, the validators it applies and the
//! draft field it fills. The transition functions define the order.

use base64::{Engine as _, engine::general_purpose};
use log::warn;

use crate::error::UserError;
use crate::session::{Prompt, Session};
use crate::users::{UserRegistry, crypto};
use crate::utils::path::expand_path;
use crate::validate::{self, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, multi_validate};
use crate::workflow::CreateUserOptions;

/// One stage of a user workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnterUsername,
    EnterPassword,
    ConfirmPassword,
    EnterPublicKeyPath,
    SelectAdminFlag,
    Commit,
}

impl Step {
    /// Transition function of the user creation workflow.
    pub fn next_in_creation(self, options: &CreateUserOptions) -> Step {
        match self {
            Step::EnterUsername => Step::EnterPassword,
            Step::EnterPassword => Step::ConfirmPassword,
            Step::ConfirmPassword => Step::EnterPublicKeyPath,
            Step::EnterPublicKeyPath if options.asks_admin() => Step::SelectAdminFlag,
            Step::EnterPublicKeyPath | Step::SelectAdminFlag | Step::Commit => Step::Commit,
        }
    }

    /// Transition function of the password change workflow.
    pub fn next_in_password_change(self) -> Step {
        match self {
            Step::EnterPassword => Step::ConfirmPassword,
            _ => Step::Commit,
        }
    }
}

/// Answers collected so far by a workflow.
#[derive(Debug, Default)]
pub struct Draft {
    pub username: String,
    pub password: String,
    /// Base64 of the key file contents
    pub public_key: String,
    pub is_admin: bool,
}

/// Runs the prompt of `step` and stores the answer in `draft`.
///
/// `Commit` is a no-op here; each workflow commits on its own.
pub async fn run_step(
    step: Step,
    draft: &mut Draft,
    session: &mut Session,
    registry: &UserRegistry,
) -> Result<(), UserError> {
    match step {
        Step::EnterUsername => {
            draft.username = username_prompt(registry).run(session).await?;
        }
        Step::EnterPassword => {
            draft.password = password_prompt().run(session).await?;
        }
        Step::ConfirmPassword => {
            confirm_prompt(draft.password.clone()).run(session).await?;
        }
        Step::EnterPublicKeyPath => {
            let path = key_path_prompt().run(session).await?;
            draft.public_key = read_public_key(&path).await?;
        }
        Step::SelectAdminFlag => {
            let answer = admin_prompt().run(session).await?;
            draft.is_admin = answer.eq_ignore_ascii_case("yes");
        }
        Step::Commit => {}
    }
    Ok(())
}

fn username_prompt(registry: &UserRegistry) -> Prompt {
    Prompt::new("New Username").validate(multi_validate(vec![
        validate::min_length(
            MIN_USERNAME_LENGTH,
            format!("Username must have at least {} characters", MIN_USERNAME_LENGTH),
        ),
        validate::username_available(registry.clone()),
    ]))
}

fn password_prompt() -> Prompt {
    Prompt::new("Password")
        .validate(validate::min_length(
            MIN_PASSWORD_LENGTH,
            format!("Password must have at least {} characters", MIN_PASSWORD_LENGTH),
        ))
        .mask('*')
}

fn confirm_prompt(password: String) -> Prompt {
    Prompt::new("Confirm your password")
        .validate(validate::matches(password, "Passwords do not match"))
        .mask('*')
}

fn key_path_prompt() -> Prompt {
    Prompt::new("Path of your public key").validate(validate::file_exists())
}

fn admin_prompt() -> Prompt {
    Prompt::new("Is admin? yes/no").validate(validate::yes_or_no())
}

/// Reads the key file at `input` and encodes it as standard padded base64.
///
/// The path was checked when it was entered, but the file can still vanish
/// or become unreadable before this read.
pub async fn read_public_key(input: &str) -> Result<String, UserError> {
    let path = expand_path(input);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(general_purpose::STANDARD.encode(bytes)),
        Err(e) => {
            warn!("Error reading public key file {}: {}", path.display(), e);
            Err(UserError::FileRead(path, e))
        }
    }
}

/// Hashes the draft password off the async runtime.
pub async fn hash_password(password: String) -> Result<String, UserError> {
    tokio::task::spawn_blocking(move || crypto::hash_password(&password))
        .await
        .map_err(|e| UserError::PasswordHash(e.to_string()))?
}

/// Runs a registry mutation off the async runtime, since it may write the
/// users file while holding the registry lock.
pub async fn commit<T, F>(registry: &UserRegistry, mutation: F) -> Result<T, UserError>
where
    F: FnOnce(&UserRegistry) -> Result<T, UserError> + Send + 'static,
    T: Send + 'static,
{
    let registry = registry.clone();
    tokio::task::spawn_blocking(move || mutation(&registry))
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?
}
